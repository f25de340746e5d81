//! Reusable field constraints shared by the request bodies in `enums`.

pub fn required(label: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{label} is required"));
    }
    Ok(())
}

pub fn length(label: &str, value: &str, min: usize, max: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(format!(
            "{label} must be between {min} and {max} characters long"
        ));
    }
    Ok(())
}

pub fn max_length(label: &str, value: Option<&str>, max: usize) -> Result<(), String> {
    match value {
        Some(v) if v.chars().count() > max => {
            Err(format!("{label} cannot be longer than {max} characters"))
        }
        _ => Ok(()),
    }
}

pub fn required_length(label: &str, value: &str, min: usize, max: usize) -> Result<(), String> {
    required(label, value)?;
    length(label, value, min, max)
}

pub fn email(value: &str) -> Result<(), String> {
    required("Email", value)?;
    let invalid = || Err("Invalid email address".to_string());
    if value.chars().any(char::is_whitespace) || value.len() > 100 {
        return invalid();
    }
    let mut parts = value.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return invalid(),
    };
    if local.is_empty() || domain.is_empty() {
        return invalid();
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return invalid();
    }
    Ok(())
}

pub fn phone(value: &str) -> Result<(), String> {
    required_length("Phone Number", value, 10, 15)?;
    if !value
        .chars()
        .all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c.is_whitespace())
    {
        return Err("Invalid phone number format".to_string());
    }
    Ok(())
}

pub fn at_least(label: &str, value: f64, min: f64) -> Result<(), String> {
    if !value.is_finite() || value < min {
        return Err(format!("{label} must be at least {min}"));
    }
    Ok(())
}
