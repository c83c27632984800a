use actix_web::{
    dev::Payload, error::ErrorUnauthorized, web::Data, Error as ActixError, FromRequest,
    HttpRequest,
};
use anyhow::Result;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Employer,
}

/// Verified caller identity. Issued elsewhere; this service trusts the
/// decoded values and only enforces capabilities against them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,          // user id
    pub business_id: Uuid,  // the business this token is scoped to
    pub role: Role,
    pub exp: usize,
}

impl Claims {
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    pub fn is_employee(&self) -> bool {
        self.role == Role::Employee
    }

    pub fn is_employer(&self) -> bool {
        self.role == Role::Employer
    }

    pub fn require_employee(&self) -> Result<(), AppError> {
        if self.is_employee() {
            Ok(())
        } else {
            Err(AppError::forbidden("This action requires the employee role"))
        }
    }

    pub fn require_employer(&self) -> Result<(), AppError> {
        if self.is_employer() {
            Ok(())
        } else {
            Err(AppError::forbidden("This action requires the employer role"))
        }
    }

    /// The token is scoped to exactly one business; anything it touches must
    /// belong to that business.
    pub fn require_business(&self, business_id: Uuid) -> Result<(), AppError> {
        if self.business_id == business_id {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "Caller does not belong to this business",
            ))
        }
    }

    /// Employees may only act on their own records.
    pub fn require_self(&self, employee_id: Uuid) -> Result<(), AppError> {
        if self.sub == employee_id {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "Employees can only access their own records",
            ))
        }
    }
}

impl FromRequest for Claims {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let auth_header = req.headers().get("Authorization");

        if let Some(auth_header) = auth_header {
            if let Ok(auth_str) = auth_header.to_str() {
                if let Some(token) = auth_str.strip_prefix("Bearer ") {
                    if let Some(config) = req.app_data::<Data<Config>>() {
                        match decode::<Claims>(
                            token,
                            &DecodingKey::from_secret(config.jwt_secret.as_ref()),
                            &Validation::new(Algorithm::HS256),
                        ) {
                            Ok(token_data) => {
                                return ready(Ok(token_data.claims));
                            }
                            Err(_) => {
                                return ready(Err(ErrorUnauthorized("Invalid token")));
                            }
                        }
                    }
                }
            }
        }

        ready(Err(ErrorUnauthorized(
            "Missing or invalid authorization header",
        )))
    }
}

/// Encode claims with the configured secret. The verification side of the
/// contract lives with the identity provider; this exists for tooling and
/// tests.
pub fn issue_token(claims: &Claims, config: &Config) -> Result<String> {
    let token = encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )?;

    Ok(token)
}
