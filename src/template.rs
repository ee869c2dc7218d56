//! Payload templates for common QR content types.
//!
//! Templates turn friendly `Key: value, Key: value` input into the
//! standard payload string a scanner expects:
//!
//! | id | input example | payload |
//! |---|---|---|
//! | `url` | `example.com` | `https://example.com` |
//! | `wifi` | `Network: MyWiFi, Password: pw, Security: WPA` | `WIFI:T:WPA;S:MyWiFi;P:pw;;` |
//! | `email` | `To: a@b.com, Subject: Hi, Body: Hello` | `mailto:a@b.com?subject=Hi&body=Hello` |
//! | `phone` | `+1 (555) 123-4567` | `tel:+15551234567` |
//! | `sms` | `Phone: +1555…, Message: Hi!` | `sms:+1555…?body=Hi%21` |
//! | `location` | `Latitude: 40.7, Longitude: -74.0` | `geo:40.7,-74.0` |
//! | `vcard` | `Name: Jo, Phone: …, Email: …` | `BEGIN:VCARD…END:VCARD` |
//! | `event` | `Title: Meeting, Start: …, End: …` | `BEGIN:VEVENT…END:VEVENT` |
//!
//! Formatting is total: missing fields degrade to documented defaults,
//! never to an error. `validate` is a pre-flight hint for interactive
//! callers; `format` does not require it to have passed.

/// A payload template. `id` is the stable lookup key used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub placeholder: &'static str,
}

pub const TEMPLATES: &[Template] = &[
    Template {
        id: "url",
        name: "Website URL",
        description: "Link to any website",
        placeholder: "https://example.com",
    },
    Template {
        id: "wifi",
        name: "WiFi Network",
        description: "Connect to WiFi automatically",
        placeholder: "Network: MyWiFi, Password: password123, Security: WPA",
    },
    Template {
        id: "email",
        name: "Email",
        description: "Send email with pre-filled content",
        placeholder: "To: user@example.com, Subject: Hello, Body: Message content",
    },
    Template {
        id: "phone",
        name: "Phone Number",
        description: "Call a phone number",
        placeholder: "+1234567890",
    },
    Template {
        id: "sms",
        name: "SMS Message",
        description: "Send SMS with pre-filled text",
        placeholder: "Phone: +1234567890, Message: Hello there!",
    },
    Template {
        id: "location",
        name: "Location",
        description: "Share GPS coordinates",
        placeholder: "Latitude: 40.7128, Longitude: -74.0060",
    },
    Template {
        id: "vcard",
        name: "Contact Card",
        description: "Share contact information",
        placeholder: "Name: John Doe, Phone: +1234567890, Email: john@example.com",
    },
    Template {
        id: "event",
        name: "Calendar Event",
        description: "Add event to calendar",
        placeholder: "Title: Meeting, Start: 2024-01-15T10:00, End: 2024-01-15T11:00",
    },
];

/// Look up a template by id.
pub fn find_template(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

impl Template {
    /// Format free-form input into this template's payload.
    pub fn format(&self, input: &str) -> String {
        match self.id {
            "url" => format_url(input),
            "wifi" => format_wifi(input),
            "email" => format_email(input),
            "phone" => format_phone(input),
            "sms" => format_sms(input),
            "location" => format_location(input),
            "vcard" => format_vcard(input),
            "event" => format_event(input),
            _ => input.to_string(),
        }
    }

    /// Whether the input looks plausible for this template. Only `url`
    /// and `phone` carry validation; everything else accepts anything.
    pub fn validate(&self, input: &str) -> bool {
        match self.id {
            "url" => {
                let candidate = format_url(input);
                candidate
                    .strip_prefix("https://")
                    .or_else(|| candidate.strip_prefix("http://"))
                    .is_some_and(|rest| {
                        let host = rest.split(['/', '?', '#']).next().unwrap_or("");
                        !host.is_empty() && !host.chars().any(char::is_whitespace)
                    })
            }
            "phone" => {
                !input.trim().is_empty()
                    && input
                        .chars()
                        .all(|c| c.is_ascii_digit() || "+-() \t".contains(c))
            }
            _ => true,
        }
    }
}

/// Extract a `Key: value` field from comma-separated input.
///
/// Key match is case-insensitive; the value is everything after the
/// first colon, trimmed. Returns `None` for a missing key or empty
/// value.
fn field(input: &str, key: &str) -> Option<String> {
    input
        .split(',')
        .map(str::trim)
        .find(|part| {
            part.get(..key.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(key))
                && part[key.len()..].starts_with(':')
        })
        .map(|part| part[key.len() + 1..].trim().to_string())
        .filter(|value| !value.is_empty())
}

fn format_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

fn format_wifi(input: &str) -> String {
    let network = field(input, "Network").unwrap_or_else(|| "MyNetwork".to_string());
    let password = field(input, "Password").unwrap_or_default();
    let security = field(input, "Security").unwrap_or_else(|| "WPA".to_string());
    format!("WIFI:T:{security};S:{network};P:{password};;")
}

fn format_email(input: &str) -> String {
    let to = field(input, "To").unwrap_or_default();
    let subject = field(input, "Subject").unwrap_or_default();
    let body = field(input, "Body").unwrap_or_default();
    format!(
        "mailto:{to}?subject={}&body={}",
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    )
}

fn digits_and_plus(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect()
}

fn format_phone(input: &str) -> String {
    format!("tel:{}", digits_and_plus(input))
}

fn format_sms(input: &str) -> String {
    let phone = field(input, "Phone").unwrap_or_default();
    let message = field(input, "Message").unwrap_or_default();
    format!(
        "sms:{}?body={}",
        digits_and_plus(&phone),
        urlencoding::encode(&message)
    )
}

fn format_location(input: &str) -> String {
    let lat = field(input, "Latitude").unwrap_or_else(|| "0".to_string());
    let lng = field(input, "Longitude").unwrap_or_else(|| "0".to_string());
    format!("geo:{lat},{lng}")
}

fn format_vcard(input: &str) -> String {
    let name = field(input, "Name").unwrap_or_default();
    let phone = field(input, "Phone").unwrap_or_default();
    let email = field(input, "Email").unwrap_or_default();
    format!("BEGIN:VCARD\nVERSION:3.0\nFN:{name}\nTEL:{phone}\nEMAIL:{email}\nEND:VCARD")
}

fn format_event(input: &str) -> String {
    let title = field(input, "Title").unwrap_or_default();
    let start = field(input, "Start").unwrap_or_default();
    let end = field(input, "End").unwrap_or_default();
    format!(
        "BEGIN:VEVENT\nSUMMARY:{title}\nDTSTART:{}\nDTEND:{}\nEND:VEVENT",
        start.replace(['-', ':'], ""),
        end.replace(['-', ':'], "")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(id: &str, input: &str) -> String {
        find_template(id).unwrap().format(input)
    }

    #[test]
    fn all_template_ids_resolve() {
        for t in TEMPLATES {
            assert_eq!(find_template(t.id).unwrap().id, t.id);
        }
        assert!(find_template("nope").is_none());
    }

    #[test]
    fn url_gets_https_prefix_when_missing() {
        assert_eq!(fmt("url", "example.com"), "https://example.com");
        assert_eq!(fmt("url", "https://example.com"), "https://example.com");
        assert_eq!(fmt("url", "http://old.example.com"), "http://old.example.com");
    }

    #[test]
    fn url_validation() {
        let t = find_template("url").unwrap();
        assert!(t.validate("example.com"));
        assert!(t.validate("https://example.com/path"));
        assert!(!t.validate(""));
    }

    #[test]
    fn url_validation_rejects_whitespace_in_the_host() {
        let t = find_template("url").unwrap();
        assert!(!t.validate("a b"));
        assert!(!t.validate("https://exa mple.com"));
        // Whitespace after the host is fine; scanners percent-encode it.
        assert!(t.validate("example.com/some path"));
    }

    #[test]
    fn wifi_payload_with_all_fields() {
        assert_eq!(
            fmt("wifi", "Network: MyWiFi, Password: secret123, Security: WPA2"),
            "WIFI:T:WPA2;S:MyWiFi;P:secret123;;"
        );
    }

    #[test]
    fn wifi_defaults_for_missing_fields() {
        assert_eq!(fmt("wifi", ""), "WIFI:T:WPA;S:MyNetwork;P:;;");
    }

    #[test]
    fn email_encodes_subject_and_body() {
        assert_eq!(
            fmt("email", "To: a@b.com, Subject: Hello World, Body: Hi & bye"),
            "mailto:a@b.com?subject=Hello%20World&body=Hi%20%26%20bye"
        );
    }

    #[test]
    fn phone_strips_formatting() {
        assert_eq!(fmt("phone", "+1 (555) 123-4567"), "tel:+15551234567");
    }

    #[test]
    fn phone_validation_rejects_letters() {
        let t = find_template("phone").unwrap();
        assert!(t.validate("+1 (555) 123-4567"));
        assert!(!t.validate("call me"));
        assert!(!t.validate(""));
    }

    #[test]
    fn sms_payload() {
        assert_eq!(
            fmt("sms", "Phone: +1 555 0100, Message: Hello there!"),
            "sms:+15550100?body=Hello%20there%21"
        );
    }

    #[test]
    fn location_payload_and_defaults() {
        assert_eq!(
            fmt("location", "Latitude: 40.7128, Longitude: -74.0060"),
            "geo:40.7128,-74.0060"
        );
        assert_eq!(fmt("location", ""), "geo:0,0");
    }

    #[test]
    fn vcard_payload() {
        let payload = fmt("vcard", "Name: Jo Doe, Phone: +1555, Email: jo@ex.com");
        assert_eq!(
            payload,
            "BEGIN:VCARD\nVERSION:3.0\nFN:Jo Doe\nTEL:+1555\nEMAIL:jo@ex.com\nEND:VCARD"
        );
    }

    #[test]
    fn event_strips_date_punctuation() {
        let payload = fmt("event", "Title: Sync, Start: 2024-01-15T10:00, End: 2024-01-15T11:00");
        assert_eq!(
            payload,
            "BEGIN:VEVENT\nSUMMARY:Sync\nDTSTART:20240115T1000\nDTEND:20240115T1100\nEND:VEVENT"
        );
    }

    #[test]
    fn field_lookup_is_case_insensitive() {
        assert_eq!(fmt("wifi", "network: a, PASSWORD: b"), "WIFI:T:WPA;S:a;P:b;;");
    }
}
