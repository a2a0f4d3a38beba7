//! Session DTOs and role resolution.
//!
//! The credential is an opaque token sent as `Authorization: Token <key>`.
//! Roles come from Django group membership and only drive what the UI shows;
//! every mutation is re-authorized by the server.

use crate::domain::common::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Answer of login and registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub key: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub username: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
}

impl RegistrationRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.username.trim().is_empty() {
            return Err("El nombre de usuario es obligatorio".into());
        }
        if !self.email.contains('@') {
            return Err("Correo electrónico inválido".into());
        }
        validate_new_password(&self.password1, &self.password2)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PasswordChangeRequest {
    pub old_password: String,
    pub new_password1: String,
    pub new_password2: String,
}

impl PasswordChangeRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.old_password.is_empty() {
            return Err("Ingrese su contraseña actual".into());
        }
        validate_new_password(&self.new_password1, &self.new_password2)
    }
}

pub const MIN_PASSWORD_LEN: usize = 8;

fn validate_new_password(p1: &str, p2: &str) -> Result<(), String> {
    if p1.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "La contraseña debe tener al menos {} caracteres",
            MIN_PASSWORD_LEN
        ));
    }
    if p1 != p2 {
        return Err("Las contraseñas no coinciden".into());
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rol {
    Administrador,
    Vendedor,
    Bodega,
    Cliente,
}

impl Rol {
    pub fn from_group(name: &str) -> Option<Rol> {
        match name.trim().to_lowercase().as_str() {
            "administrador" | "administradores" | "admin" => Some(Rol::Administrador),
            "vendedor" | "vendedores" => Some(Rol::Vendedor),
            "bodega" | "bodeguero" | "bodegueros" => Some(Rol::Bodega),
            "cliente" | "clientes" => Some(Rol::Cliente),
            _ => None,
        }
    }
}

/// `GET /auth/user/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(alias = "pk")]
    pub id: EntityId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
    /// Customer record linked to this account, if any.
    #[serde(default)]
    pub cliente: Option<EntityId>,
}

impl UserInfo {
    pub fn roles(&self) -> Vec<Rol> {
        let mut roles: Vec<Rol> = self.groups.iter().filter_map(|g| Rol::from_group(g)).collect();
        if self.is_superuser && !roles.contains(&Rol::Administrador) {
            roles.push(Rol::Administrador);
        }
        roles
    }

    pub fn has_role(&self, rol: Rol) -> bool {
        self.roles().contains(&rol)
    }

    pub fn has_any_role(&self, wanted: &[Rol]) -> bool {
        let roles = self.roles();
        wanted.iter().any(|r| roles.contains(r))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Rol::Administrador)
    }

    /// Back-office user: anyone who can act on behalf of customers.
    pub fn is_staff_member(&self) -> bool {
        self.is_staff || self.has_any_role(&[Rol::Administrador, Rol::Vendedor, Rol::Bodega])
    }

    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// `PUT /auth/user/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdateRequest {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&UserInfo> for ProfileUpdateRequest {
    fn from(u: &UserInfo) -> Self {
        Self {
            username: u.username.clone(),
            email: u.email.clone(),
            first_name: u.first_name.clone(),
            last_name: u.last_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(groups: &[&str], superuser: bool) -> UserInfo {
        serde_json::from_value(json!({
            "pk": 1,
            "username": "jperez",
            "groups": groups,
            "is_superuser": superuser
        }))
        .unwrap()
    }

    #[test]
    fn test_roles_from_groups() {
        let u = user(&["Vendedores", "desconocido"], false);
        assert_eq!(u.roles(), vec![Rol::Vendedor]);
        assert!(u.is_staff_member());
        assert!(!u.is_admin());
    }

    #[test]
    fn test_superuser_is_admin() {
        let u = user(&[], true);
        assert!(u.is_admin());
        assert!(u.is_staff_member());
    }

    #[test]
    fn test_customer_is_not_staff() {
        let u = user(&["Cliente"], false);
        assert!(!u.is_staff_member());
        assert!(u.has_role(Rol::Cliente));
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut u = user(&[], false);
        assert_eq!(u.display_name(), "jperez");
        u.first_name = "Juan".into();
        assert_eq!(u.display_name(), "Juan");
    }

    #[test]
    fn test_password_rules() {
        let mut req = RegistrationRequest {
            username: "taller".into(),
            email: "t@t.cl".into(),
            password1: "secreto123".into(),
            password2: "secreto123".into(),
        };
        assert!(req.validate().is_ok());
        req.password2 = "otro12345".into();
        assert!(req.validate().is_err());
        req.password1 = "corta".into();
        req.password2 = "corta".into();
        assert!(req.validate().is_err());
    }
}
