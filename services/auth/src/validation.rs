//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Roles an account may be created with
pub const VALID_ROLES: &[&str] = &["admin", "supervisor", "operador", "superadmin"];

/// Validate the display name
pub fn validate_nombre(nombre: &str) -> Result<(), String> {
    if nombre.trim().is_empty() {
        return Err("Por favor ingrese el nombre".to_string());
    }

    if nombre.len() > 100 {
        return Err("El nombre no puede superar los 100 caracteres".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Por favor, ingrese su correo electrónico".to_string());
    }

    if email.len() > 254 {
        return Err("El correo electrónico no puede superar los 254 caracteres".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Por favor, ingrese un correo electrónico válido".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Por favor, ingrese su contraseña".to_string());
    }

    if password.len() < 6 {
        return Err("La contraseña debe tener al menos 6 caracteres".to_string());
    }

    if password.len() > 128 {
        return Err("La contraseña no puede superar los 128 caracteres".to_string());
    }

    Ok(())
}

/// Validate the requested role against the known role set
pub fn validate_rol(rol: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&rol) {
        Ok(())
    } else {
        Err(format!("El rol {} no es válido", rol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_nombre() {
        assert!(validate_nombre("Ana").is_ok());
        assert!(validate_nombre("").is_err());
        assert!(validate_nombre("   ").is_err());
        assert!(validate_nombre(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@x.com").is_ok());
        assert!(validate_email("ana.garcia+hr@empresa.com.bo").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-es-un-email").is_err());
        assert!(validate_email("falta@dominio").is_err());
    }

    #[test]
    fn test_validate_password_minimum_length() {
        assert!(validate_password("secret1").is_ok());
        assert!(validate_password("123456").is_ok());
        assert!(validate_password("12345").is_err());
        assert!(validate_password("").is_err());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_rol() {
        assert!(validate_rol("admin").is_ok());
        assert!(validate_rol("supervisor").is_ok());
        assert!(validate_rol("operador").is_ok());
        assert!(validate_rol("superadmin").is_ok());
        assert!(validate_rol("root").is_err());
        assert!(validate_rol("").is_err());
    }
}
