use std::str::FromStr;
use std::time::Duration;

/// Duration given as `30s`, `2m`, `1h15m` or a bare number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_value = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                let unit = match c {
                    's' => 1,
                    'm' => 60,
                    'h' => 3600,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds = num
                    .checked_mul(unit)
                    .and_then(|secs| total_seconds.checked_add(secs))
                    .ok_or_else(|| format!("Duration too large: {}", s))?;
                current_number.clear();
                has_value = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // trailing number without a unit counts as seconds
        if !current_number.is_empty() {
            let secs = current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_seconds = total_seconds
                .checked_add(secs)
                .ok_or_else(|| format!("Duration too large: {}", s))?;
            has_value = true;
        }

        if !has_value {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: &str) -> u64 {
        s.parse::<HumanDuration>().unwrap().0.as_secs()
    }

    #[test]
    fn test_parse_durations() {
        assert_eq!(secs("30s"), 30);
        assert_eq!(secs("2m"), 120);
        assert_eq!(secs("1h15m30s"), 4530);
        assert_eq!(secs("45"), 45);
        assert_eq!(secs("1m 5"), 65);
    }

    #[test]
    fn test_rejects_bad_durations() {
        assert!("".parse::<HumanDuration>().is_err());
        assert!("s".parse::<HumanDuration>().is_err());
        assert!("10d".parse::<HumanDuration>().is_err());
        assert!("ten".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_rejects_overflowing_durations() {
        let err = "9999999999999999h".parse::<HumanDuration>().unwrap_err();
        assert!(err.starts_with("Duration too large"));
        assert!("18446744073709551615s1s".parse::<HumanDuration>().is_err());
        assert!("18446744073709551615s 1".parse::<HumanDuration>().is_err());
    }
}
