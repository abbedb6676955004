//! Identity gate.
//!
//! Callers present a bearer token issued by the campus identity provider.
//! The token is verified here, the email domain is checked, and the caller's
//! user record is fetched (or created on first sign-in). Every feature other
//! than the landing page requires a contact number on file; [`GateDecision`]
//! tells the caller whether they must register one first.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use lostfound_common::{AppError, AppResult, config::AuthConfig};
use lostfound_db::{entities::user, repositories::UserRepository};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Shortest accepted contact number, in digits.
const CONTACT_NUMBER_MIN_DIGITS: usize = 8;
/// Longest accepted contact number, in digits.
const CONTACT_NUMBER_MAX_DIGITS: usize = 16;

/// Claims carried by an identity-provider token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Stable user id.
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// An authenticated caller.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user: user::Model,
    pub has_contact_number: bool,
}

impl Principal {
    #[must_use]
    pub fn new(user: user::Model) -> Self {
        let has_contact_number = user.has_contact_number();
        Self {
            user,
            has_contact_number,
        }
    }

    /// Principal built from token claims alone, with no contact number.
    fn from_claims(claims: &TokenClaims) -> Self {
        Self {
            user: user::Model {
                id: claims.sub.clone(),
                email: claims.email.clone(),
                name: claims.name.clone(),
                photo_url: claims.picture.clone(),
                contact_number: None,
                created_at: Utc::now().into(),
                updated_at: None,
            },
            has_contact_number: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.user.id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.user.email
    }

    /// The contact number, when one is on file.
    #[must_use]
    pub fn contact_number(&self) -> Option<&str> {
        if self.has_contact_number {
            self.user.contact_number.as_deref()
        } else {
            None
        }
    }

    /// The contact number, or [`AppError::ContactNumberRequired`].
    pub fn require_contact_number(&self) -> AppResult<&str> {
        self.contact_number().ok_or(AppError::ContactNumberRequired)
    }
}

/// Where a signed-in caller may go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GateDecision {
    /// The caller may use every feature.
    Proceed,
    /// The caller must register a contact number first.
    CollectContactNumber,
}

impl GateDecision {
    /// Client route the caller should be sent to, if any.
    #[must_use]
    pub const fn redirect(self) -> Option<&'static str> {
        match self {
            Self::Proceed => None,
            Self::CollectContactNumber => Some("/add-whatsapp"),
        }
    }
}

/// Identity service.
#[derive(Clone)]
pub struct IdentityService {
    user_repo: UserRepository,
    decoding_key: DecodingKey,
    validation: Validation,
    allowed_email_domain: Option<String>,
}

impl IdentityService {
    /// Create a new identity service.
    #[must_use]
    pub fn new(user_repo: UserRepository, config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // No audience is configured; accept whatever the provider sets.
        validation.validate_aud = false;
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            user_repo,
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            allowed_email_domain: config
                .allowed_email_domain
                .as_deref()
                .map(|d| d.trim_start_matches('@').to_ascii_lowercase()),
        }
    }

    /// Verify a bearer token and return its claims.
    pub fn verify_token(&self, token: &str) -> AppResult<TokenClaims> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| {
                debug!(error = %e, "Rejected bearer token");
                AppError::Unauthorized
            },
        )?;

        let claims = data.claims;
        if claims.sub.trim().is_empty() || claims.email.trim().is_empty() {
            return Err(AppError::Unauthorized);
        }

        self.check_email_domain(&claims.email)?;
        Ok(claims)
    }

    fn check_email_domain(&self, email: &str) -> AppResult<()> {
        let Some(domain) = &self.allowed_email_domain else {
            return Ok(());
        };

        let matches = email
            .rsplit_once('@')
            .is_some_and(|(_, d)| d.eq_ignore_ascii_case(domain));

        if matches {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "only emails from {domain} are allowed"
            )))
        }
    }

    /// Verify a token and resolve the caller.
    pub async fn authenticate(&self, token: &str) -> AppResult<Principal> {
        let claims = self.verify_token(token)?;
        Ok(self.resolve(&claims).await)
    }

    /// Fetch or create the user behind verified claims.
    ///
    /// A failed read degrades to a principal without a contact number.
    pub async fn resolve(&self, claims: &TokenClaims) -> Principal {
        match self.user_repo.find_by_id(&claims.sub).await {
            Ok(Some(user)) => Principal::new(user),
            Ok(None) => self.register(claims).await,
            Err(e) => {
                warn!(user_id = %claims.sub, error = %e, "Failed to read user record");
                Principal::from_claims(claims)
            }
        }
    }

    async fn register(&self, claims: &TokenClaims) -> Principal {
        let model = user::ActiveModel {
            id: Set(claims.sub.clone()),
            email: Set(claims.email.clone()),
            name: Set(claims.name.clone()),
            photo_url: Set(claims.picture.clone()),
            contact_number: Set(None),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        match self.user_repo.create(model).await {
            Ok(user) => {
                info!(user_id = %user.id, "Registered user on first sign-in");
                Principal::new(user)
            }
            Err(e) => {
                warn!(user_id = %claims.sub, error = %e, "Failed to create user record");
                Principal::from_claims(claims)
            }
        }
    }

    /// Decide where the caller goes after sign-in.
    #[must_use]
    pub const fn gate(principal: &Principal) -> GateDecision {
        if principal.has_contact_number {
            GateDecision::Proceed
        } else {
            GateDecision::CollectContactNumber
        }
    }

    /// Register the caller's contact number.
    pub async fn set_contact_number(
        &self,
        principal: &Principal,
        raw: &str,
    ) -> AppResult<user::Model> {
        let number = normalize_contact_number(raw)?;

        let user = self.user_repo.get_by_id(principal.id()).await?;
        if user.has_contact_number() {
            return Err(AppError::Conflict(
                "A contact number is already registered".to_string(),
            ));
        }

        let user = self.user_repo.set_contact_number(user, number).await?;
        info!(user_id = %user.id, "Contact number registered");
        Ok(user)
    }
}

/// Trim and check a contact number.
///
/// Accepts digits with an optional leading `+`. Spaces and dashes are dropped.
pub fn normalize_contact_number(raw: &str) -> AppResult<String> {
    let trimmed = raw.trim();
    let (plus, rest) = match trimmed.strip_prefix('+') {
        Some(rest) => ("+", rest),
        None => ("", trimmed),
    };

    let digits: String = rest.chars().filter(|c| !matches!(c, ' ' | '-')).collect();

    if digits.is_empty() {
        return Err(AppError::Validation(
            "contactNumber: must not be empty".to_string(),
        ));
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "contactNumber: only digits and a leading + are allowed".to_string(),
        ));
    }
    if !(CONTACT_NUMBER_MIN_DIGITS..=CONTACT_NUMBER_MAX_DIGITS).contains(&digits.len()) {
        return Err(AppError::Validation(format!(
            "contactNumber: must have between {CONTACT_NUMBER_MIN_DIGITS} and {CONTACT_NUMBER_MAX_DIGITS} digits"
        )));
    }

    Ok(format!("{plus}{digits}"))
}

/// WhatsApp chat link for a contact number.
///
/// Local numbers (leading `0`) are rewritten to the `62` country code.
#[must_use]
pub fn whatsapp_link(contact_number: &str) -> Option<String> {
    let digits = contact_number.trim().trim_start_matches('+');
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let international = match digits.strip_prefix('0') {
        Some(rest) => format!("62{rest}"),
        None => digits.to_string(),
    };

    Some(format!("https://wa.me/{international}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
    use std::sync::Arc;

    const SECRET: &str = "test-secret";
    const DOMAIN: &str = "student.uinsgd.ac.id";

    fn auth_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: SECRET.to_string(),
            issuer: None,
            allowed_email_domain: Some(DOMAIN.to_string()),
        }
    }

    fn token_for(sub: &str, email: &str) -> String {
        let claims = TokenClaims {
            sub: sub.to_string(),
            email: email.to_string(),
            name: Some("Siti".to_string()),
            picture: None,
            exp: Utc::now().timestamp() + 3600,
            iss: None,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn create_test_user(id: &str, contact: Option<&str>) -> user::Model {
        user::Model {
            id: id.to_string(),
            email: format!("{id}@{DOMAIN}"),
            name: Some("Siti".to_string()),
            photo_url: None,
            contact_number: contact.map(ToString::to_string),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with(db: MockDatabase) -> IdentityService {
        let repo = UserRepository::new(Arc::new(db.into_connection()));
        IdentityService::new(repo, &auth_config())
    }

    #[tokio::test]
    async fn test_authenticate_existing_user() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("u1", Some("081234567890"))]]),
        );

        let principal = service
            .authenticate(&token_for("u1", &format!("u1@{DOMAIN}")))
            .await
            .unwrap();

        assert_eq!(principal.id(), "u1");
        assert!(principal.has_contact_number);
        assert_eq!(IdentityService::gate(&principal), GateDecision::Proceed);
    }

    #[tokio::test]
    async fn test_authenticate_creates_user_on_first_sign_in() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .append_query_results([[create_test_user("u2", None)]]),
        );

        let principal = service
            .authenticate(&token_for("u2", &format!("u2@{DOMAIN}")))
            .await
            .unwrap();

        assert_eq!(principal.id(), "u2");
        assert!(!principal.has_contact_number);
        assert_eq!(
            IdentityService::gate(&principal),
            GateDecision::CollectContactNumber
        );
        assert_eq!(
            IdentityService::gate(&principal).redirect(),
            Some("/add-whatsapp")
        );
    }

    #[tokio::test]
    async fn test_authenticate_rejects_other_domain() {
        let service = service_with(MockDatabase::new(DatabaseBackend::Postgres));

        let result = service
            .authenticate(&token_for("u3", "someone@gmail.com"))
            .await;

        match result {
            Err(AppError::Forbidden(msg)) => assert!(msg.contains(DOMAIN)),
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_authenticate_rejects_bad_signature() {
        let service = service_with(MockDatabase::new(DatabaseBackend::Postgres));
        let token = encode(
            &Header::default(),
            &TokenClaims {
                sub: "u1".to_string(),
                email: format!("u1@{DOMAIN}"),
                name: None,
                picture: None,
                exp: Utc::now().timestamp() + 3600,
                iss: None,
            },
            &EncodingKey::from_secret(b"another-secret"),
        )
        .unwrap();

        assert!(matches!(
            service.authenticate(&token).await,
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            service.authenticate("not-a-jwt").await,
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_read_failure_degrades_to_no_contact_number() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([DbErr::Custom("connection reset".to_string())]),
        );

        let principal = service
            .authenticate(&token_for("u1", &format!("u1@{DOMAIN}")))
            .await
            .unwrap();

        assert_eq!(principal.id(), "u1");
        assert!(!principal.has_contact_number);
        assert!(matches!(
            principal.require_contact_number(),
            Err(AppError::ContactNumberRequired)
        ));
    }

    #[tokio::test]
    async fn test_contact_status_is_read_per_request() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("u1", Some("081234567890"))]])
                .append_query_results([[create_test_user("u1", Some("   "))]])
                .append_query_errors([DbErr::Custom("timeout".to_string())]),
        );
        let token = token_for("u1", &format!("u1@{DOMAIN}"));

        assert!(service.authenticate(&token).await.unwrap().has_contact_number);
        assert!(!service.authenticate(&token).await.unwrap().has_contact_number);
        assert!(!service.authenticate(&token).await.unwrap().has_contact_number);
    }

    #[tokio::test]
    async fn test_set_contact_number() {
        let mut updated = create_test_user("u1", Some("081234567890"));
        updated.updated_at = Some(Utc::now().into());

        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("u1", None)]])
                .append_query_results([[updated]]),
        );
        let principal = Principal::new(create_test_user("u1", None));

        let user = service
            .set_contact_number(&principal, "  081234567890 ")
            .await
            .unwrap();

        assert_eq!(user.contact_number.as_deref(), Some("081234567890"));
    }

    #[tokio::test]
    async fn test_set_contact_number_twice_conflicts() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("u1", Some("081234567890"))]]),
        );
        let principal = Principal::new(create_test_user("u1", None));

        let result = service.set_contact_number(&principal, "089876543210").await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[test]
    fn test_normalize_contact_number() {
        assert_eq!(
            normalize_contact_number(" 0812-3456-7890 ").unwrap(),
            "081234567890"
        );
        assert_eq!(
            normalize_contact_number("+62 812 3456 7890").unwrap(),
            "+6281234567890"
        );
        assert!(normalize_contact_number("").is_err());
        assert!(normalize_contact_number("   ").is_err());
        assert!(normalize_contact_number("0812abc").is_err());
        assert!(normalize_contact_number("1234").is_err());
        assert!(normalize_contact_number("12345678901234567").is_err());
    }

    #[test]
    fn test_whatsapp_link() {
        assert_eq!(
            whatsapp_link("081234567890").as_deref(),
            Some("https://wa.me/6281234567890")
        );
        assert_eq!(
            whatsapp_link("+6281234567890").as_deref(),
            Some("https://wa.me/6281234567890")
        );
        assert_eq!(whatsapp_link(""), None);
        assert_eq!(whatsapp_link("n/a"), None);
    }
}
