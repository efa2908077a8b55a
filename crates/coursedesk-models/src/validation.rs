/// Cleans up user input before it is validated: surrounding whitespace is
/// dropped and email addresses are lowercased.
pub trait Normalize {
    fn normalize(&mut self);
}

pub fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

pub fn normalize_email(value: &mut String) {
    *value = value.trim().to_lowercase();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_in_place() {
        let mut s = "  Ada Lovelace \n".to_string();
        trim_in_place(&mut s);
        assert_eq!(s, "Ada Lovelace");
    }

    #[test]
    fn test_normalize_email() {
        let mut s = " Ada@Example.COM ".to_string();
        normalize_email(&mut s);
        assert_eq!(s, "ada@example.com");
    }
}
