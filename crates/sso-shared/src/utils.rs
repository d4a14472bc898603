//! Utility functions

/// Masks the local part of an email so it can appear in logs.
pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let visible = local.chars().take(if local.chars().count() <= 2 { 1 } else { 2 });
        format!("{}***{}", visible.collect::<String>(), domain)
    } else {
        "***".to_string()
    }
}
