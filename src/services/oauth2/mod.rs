pub mod apple;
pub mod google;
pub mod kakao;

pub use apple::AppleOAuth2Client;
pub use google::GoogleOAuth2Client;
pub use kakao::KakaoOAuth2Client;

use crate::models::domain::Provider;

/// Identity attributes extracted from a provider after a successful code
/// exchange. This is all the login flow needs.
#[derive(Clone, Debug)]
pub struct OAuth2UserInfo {
    pub email: String,
    pub name: String,
    pub provider: Provider,
}

/// Access credentials returned by a provider's token endpoint. `id_token`
/// is only present for OpenID Connect providers (Apple).
#[derive(Clone, Debug, serde::Deserialize)]
pub struct OAuth2Tokens {
    pub access_token: String,
    #[serde(default)]
    pub id_token: Option<String>,
}
