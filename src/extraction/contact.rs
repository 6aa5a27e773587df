//! Contact details (email, phone) pulled from raw CV text

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Phone candidates shorter than this are dates, years or ids rather than numbers
const MIN_PHONE_DIGITS: usize = 9;
const MAX_PHONE_DIGITS: usize = 15;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
}

pub struct ContactExtractor {
    email_regex: Regex,
    phone_regex: Regex,
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactExtractor {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
            .expect("Invalid email regex");

        // Local and international formats: 0912 345 678, +84 912-345-678, (028) 3812 3456
        let phone_regex = Regex::new(r"(?:\+\d{1,3}[\s.-]?)?\(?\d{2,4}\)?(?:[\s.-]?\d{3,4}){2}")
            .expect("Invalid phone regex");

        Self {
            email_regex,
            phone_regex,
        }
    }

    /// Extract the first email and the first phone number. Missing fields stay `None`.
    pub fn extract(&self, text: &str) -> ContactInfo {
        ContactInfo {
            email: self.extract_email(text),
            phone: self.extract_phone(text),
        }
    }

    pub fn extract_email(&self, text: &str) -> Option<String> {
        self.email_regex.find(text).map(|m| m.as_str().to_string())
    }

    pub fn extract_phone(&self, text: &str) -> Option<String> {
        self.phone_regex
            .find_iter(text)
            .map(|m| m.as_str().trim().to_string())
            .find(|candidate| {
                let digits = candidate.chars().filter(char::is_ascii_digit).count();
                (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
            })
    }
}
