/// Emails are compared and stored in this normalized form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("A@X.com "), "a@x.com");
        assert_eq!(normalize_email("  User@Example.COM"), "user@example.com");
        assert_eq!(normalize_email("a@x.com"), "a@x.com");
    }
}
