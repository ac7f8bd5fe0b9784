/// Country scoping policy for Forkline resources.
///
/// Provides row-level country restrictions derived from the authenticated
/// principal. Admin and Manager operate across all countries; Member is
/// pinned to their own. The policy is a pair of pure functions applied
/// explicitly by handlers so the read filter and the write check stay
/// visible at the call site.
use crypto_core::{Country, Role};
use error_types::ServiceError;

use crate::jwt_auth::Principal;

/// Read-time filter for list endpoints.
///
/// `None` means unrestricted (Admin/Manager see every country); `Some`
/// carries the single country a Member may see.
pub fn read_filter(principal: &Principal) -> Option<Country> {
    match principal.role {
        Role::Admin | Role::Manager => None,
        Role::Member => Some(principal.country),
    }
}

/// Write-time check for create endpoints whose payload declares a country.
///
/// Admin and Manager pass unconditionally. A Member may only write a
/// resource declared for their own country.
pub fn enforce_write_country(
    principal: &Principal,
    resource_country: Country,
) -> Result<(), ServiceError> {
    let is_admin_or_manager = matches!(principal.role, Role::Admin | Role::Manager);

    if !is_admin_or_manager && resource_country != principal.country {
        return Err(ServiceError::CountryMismatch(
            principal.country.to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn principal(role: Role, country: Country) -> Principal {
        Principal {
            user_id: Uuid::new_v4(),
            role,
            country,
        }
    }

    #[test]
    fn test_member_reads_own_country_only() {
        let p = principal(Role::Member, Country::India);
        assert_eq!(read_filter(&p), Some(Country::India));
    }

    #[test]
    fn test_admin_and_manager_read_unrestricted() {
        assert_eq!(read_filter(&principal(Role::Admin, Country::America)), None);
        assert_eq!(read_filter(&principal(Role::Manager, Country::India)), None);
    }

    #[test]
    fn test_member_write_matching_country_passes() {
        let p = principal(Role::Member, Country::India);
        assert!(enforce_write_country(&p, Country::India).is_ok());
    }

    #[test]
    fn test_member_write_foreign_country_rejected() {
        let p = principal(Role::Member, Country::India);
        let err = enforce_write_country(&p, Country::America).unwrap_err();
        assert!(err.to_string().contains("(India)"));
    }

    #[test]
    fn test_privileged_write_any_country() {
        assert!(
            enforce_write_country(&principal(Role::Admin, Country::India), Country::America)
                .is_ok()
        );
        assert!(
            enforce_write_country(&principal(Role::Manager, Country::America), Country::India)
                .is_ok()
        );
    }
}
