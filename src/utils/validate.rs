use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::grades::entities::{MAX_SCORE, MIN_SCORE};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("Invalid time regex"));

static MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4})-(0[1-9]|1[0-2])$").expect("Invalid month regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 密码至少 8 位，且同时包含字母和数字
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < 8 {
        return Err("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_alphabetic()) {
        return Err("Password must contain at least one letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one digit");
    }
    Ok(())
}

/// HH:MM，24 小时制
pub fn validate_time(time: &str) -> Result<(), &'static str> {
    if !TIME_RE.is_match(time) {
        return Err("Time must use HH:MM format");
    }
    Ok(())
}

pub fn validate_day_of_week(day: i32) -> Result<(), &'static str> {
    if !(1..=7).contains(&day) {
        return Err("day_of_week must be between 1 (Monday) and 7 (Sunday)");
    }
    Ok(())
}

pub fn validate_score(score: f64) -> Result<(), &'static str> {
    if !score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err("Score must be between 0 and 100");
    }
    Ok(())
}

/// 解析 YYYY-MM，返回 [月初, 下月初)
pub fn parse_month(month: &str) -> Result<(NaiveDate, NaiveDate), &'static str> {
    const INVALID: &str = "Month must use YYYY-MM format";

    let caps = MONTH_RE.captures(month.trim()).ok_or(INVALID)?;
    let year = caps[1].parse::<i32>().map_err(|_| INVALID)?;
    let month = caps[2].parse::<u32>().map_err(|_| INVALID)?;

    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or(INVALID)?;
    let end = if start.month() == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(INVALID)?;

    Ok((start, end))
}

/// 去除首尾空白，空串视为缺失
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("guru@sekolah.sch.id").is_ok());
        assert!(validate_email("guru@sekolah").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("guru2024").is_ok());
        assert!(validate_password("short1").is_err());
        assert!(validate_password("onlyletters").is_err());
        assert!(validate_password("12345678").is_err());
    }

    #[test]
    fn test_validate_time() {
        assert!(validate_time("07:30").is_ok());
        assert!(validate_time("23:59").is_ok());
        assert!(validate_time("24:00").is_err());
        assert!(validate_time("7:30").is_err());
    }

    #[test]
    fn test_validate_score() {
        assert!(validate_score(0.0).is_ok());
        assert!(validate_score(100.0).is_ok());
        assert!(validate_score(100.5).is_err());
        assert!(validate_score(-1.0).is_err());
        assert!(validate_score(f64::NAN).is_err());
    }

    #[test]
    fn test_parse_month() {
        let (start, end) = parse_month("2024-03").unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());

        let (start, end) = parse_month("2024-12").unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("March").is_err());
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(Some("  ".to_string())), None);
        assert_eq!(
            normalize_optional(Some(" 101 ".to_string())),
            Some("101".to_string())
        );
        assert_eq!(normalize_optional(None), None);
    }
}
