use std::fmt::{self, Debug, Formatter};

/// An optional password whose `Debug` output never reveals the secret
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Password(Option<String>);

impl Password {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    pub fn secret(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("Password(<hidden>)"),
            None => f.write_str("Password(None)"),
        }
    }
}

impl From<Option<String>> for Password {
    fn from(password: Option<String>) -> Self {
        Self(password)
    }
}

impl From<&str> for Password {
    fn from(password: &str) -> Self {
        Self(Some(password.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expose_the_secret_only_on_request() {
        let password = Password::from("hunter42");

        assert!(password.is_set());
        assert_eq!(password.secret(), Some("hunter42"));
        assert_eq!(Password::from(None), Password::none());
    }

    #[test]
    fn should_not_leak_the_secret_or_its_length_into_debug_output() {
        assert_eq!(format!("{:?}", Password::none()), "Password(None)");
        assert_eq!(
            format!("{:?}", Password::from("hunter42")),
            "Password(<hidden>)"
        );
    }
}
