use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Decoded identity attached to a request: the user id plus its granted
/// authorities (role names).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JwtAuthentication {
    pub id: String,
    pub authorities: Vec<String>,
}

impl JwtAuthentication {
    pub fn new(id: &str, authorities: Vec<String>) -> Self {
        Self {
            id: id.to_string(),
            authorities,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.authorities.iter().any(|a| a == "ADMIN")
    }
}

/// Signed claim payload. Authorities travel as a comma-joined string. The
/// `jti` makes every issued token distinct even within the same second,
/// which refresh rotation relies on.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub authorities: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,
}

impl Claims {
    pub fn new(authentication: &JwtAuthentication, expire_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expire_hours);

        Self {
            sub: authentication.id.clone(),
            authorities: authentication.authorities.join(","),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
            jti: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn to_authentication(&self) -> JwtAuthentication {
        JwtAuthentication {
            id: self.sub.clone(),
            authorities: self
                .authorities
                .split(',')
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_round_trip() {
        let authentication =
            JwtAuthentication::new("user-1", vec!["USER".to_string(), "ADMIN".to_string()]);
        let claims = Claims::new(&authentication, 2);

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.authorities, "USER,ADMIN");
        assert!(claims.exp > claims.iat);

        assert_eq!(claims.to_authentication(), authentication);
    }

    #[test]
    fn test_is_admin() {
        let user = JwtAuthentication::new("user-1", vec!["USER".to_string()]);
        let admin = JwtAuthentication::new("user-2", vec!["ADMIN".to_string()]);

        assert!(!user.is_admin());
        assert!(admin.is_admin());
    }
}
