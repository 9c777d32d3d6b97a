use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Cliente,
    AdministradorEmpresa,
    AdministradorTerminal,
    SupervisorAcceso,
    Cajero,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Cliente => "Cliente",
            Role::AdministradorEmpresa => "AdministradorEmpresa",
            Role::AdministradorTerminal => "AdministradorTerminal",
            Role::SupervisorAcceso => "SupervisorAcceso",
            Role::Cajero => "Cajero",
        }
    }
}

/// Nombre de rol que no pertenece al núcleo de venta
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cliente" => Ok(Role::Cliente),
            "AdministradorEmpresa" => Ok(Role::AdministradorEmpresa),
            "AdministradorTerminal" => Ok(Role::AdministradorTerminal),
            "SupervisorAcceso" => Ok(Role::SupervisorAcceso),
            "Cajero" => Ok(Role::Cajero),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Usuario autenticado que el middleware inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub roles: Vec<Role>,
    pub company_id: Option<Uuid>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn has_any_role(&self, allowed: &[Role]) -> bool {
        allowed.iter().any(|role| self.has_role(*role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_names() {
        for role in [
            Role::Cliente,
            Role::AdministradorEmpresa,
            Role::AdministradorTerminal,
            Role::SupervisorAcceso,
            Role::Cajero,
        ] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert_eq!("admin".parse::<Role>(), Err(UnknownRole("admin".to_string())));
    }

    #[test]
    fn test_has_any_role() {
        let user = AuthenticatedUser {
            id: Uuid::new_v4(),
            roles: vec![Role::AdministradorEmpresa],
            company_id: Some(Uuid::new_v4()),
        };
        assert!(user.has_any_role(&[Role::AdministradorTerminal, Role::AdministradorEmpresa]));
        assert!(!user.has_any_role(&[Role::Cliente]));
    }
}
