use std::sync::LazyLock;

use regex::Regex;

pub const RESEND_TIP: &str = "Resend verification email";
pub const SENT_TIP: &str = "Verification email sent";

// `\w` is kept ASCII-only
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9][A-Za-z0-9_.\-]*@[a-z0-9\-]+(\.[a-z]{2,5}){1,2}$").unwrap()
});

/// A structured check, not RFC 5322: lowercase local start, one lowercase
/// domain label, then one or two 2-5 letter suffixes.
pub fn validate_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// State of the "set email" form on the user center page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailForm {
    pub email: String,
    pub email_error: bool,
    /// Whether the form is shown.
    pub open: bool,
    pub send_disabled: bool,
    pub tip: String,
}

impl Default for EmailForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            email_error: false,
            open: false,
            send_disabled: false,
            tip: RESEND_TIP.into(),
        }
    }
}

impl EmailForm {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn mark_sent(&mut self) {
        self.open = false;
        self.send_disabled = true;
        self.tip = SENT_TIP.into();
    }
}
