// ─── Loader Promotions ───
// Resolves `recommended` / `latest` loader aliases through a promotions map
// keyed by "<minecraft>-<alias>".

use std::collections::HashMap;
use std::future::Future;

use serde::Deserialize;
use tracing::info;

use crate::core::error::{InstallError, InstallResult};

#[derive(Debug, Default, Deserialize)]
pub struct LoaderPromotions {
    #[serde(default)]
    pub promos: HashMap<String, String>,
}

/// A loader version as the user asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderVersionRequest {
    Recommended,
    Latest,
    Concrete(String),
}

impl LoaderVersionRequest {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "recommended" => Self::Recommended,
            "latest" => Self::Latest,
            other => Self::Concrete(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Recommended => "recommended",
            Self::Latest => "latest",
            Self::Concrete(v) => v,
        }
    }

    pub fn is_alias(&self) -> bool {
        !matches!(self, Self::Concrete(_))
    }
}

impl LoaderPromotions {
    /// Look up `"<mc_version>-<alias>"`. A miss is an error, never a fallback.
    pub fn lookup(&self, loader: &str, mc_version: &str, alias: &str) -> InstallResult<String> {
        let key = format!("{mc_version}-{alias}");
        self.promos
            .get(&key)
            .map(|build| format!("{mc_version}-{build}"))
            .ok_or(InstallError::LoaderVersionNotFound {
                loader: loader.to_string(),
                version: key,
            })
    }
}

/// Produce a concrete `"<mc_version>-<build>"` loader version.
///
/// `fetch_promotions` is only awaited when `requested` is an alias.
pub async fn resolve_loader_version<F, Fut>(
    loader: &str,
    mc_version: &str,
    requested: &LoaderVersionRequest,
    fetch_promotions: F,
) -> InstallResult<String>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = InstallResult<LoaderPromotions>>,
{
    if !requested.is_alias() {
        return Ok(format!("{mc_version}-{}", requested.as_str()));
    }

    let promotions = fetch_promotions().await?;
    let resolved = promotions.lookup(loader, mc_version, requested.as_str())?;
    info!("Resolved {} {} to {}", loader, requested.as_str(), resolved);
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn promotions() -> LoaderPromotions {
        serde_json::from_str(
            r#"{
                "homepage": "https://files.minecraftforge.net/",
                "promos": {
                    "1.20.1-recommended": "47.2.0",
                    "1.20.1-latest": "47.3.12"
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn parses_aliases() {
        assert_eq!(LoaderVersionRequest::parse("recommended"), LoaderVersionRequest::Recommended);
        assert_eq!(LoaderVersionRequest::parse("latest"), LoaderVersionRequest::Latest);
        assert_eq!(
            LoaderVersionRequest::parse("47.1.0"),
            LoaderVersionRequest::Concrete("47.1.0".into())
        );
    }

    #[tokio::test]
    async fn recommended_alias_resolves_through_promotions() {
        let resolved = resolve_loader_version(
            "Forge",
            "1.20.1",
            &LoaderVersionRequest::Recommended,
            || async { Ok(promotions()) },
        )
        .await
        .unwrap();

        assert_eq!(resolved, "1.20.1-47.2.0");
    }

    #[tokio::test]
    async fn missing_promotion_is_fatal_not_latest() {
        let promos = LoaderPromotions {
            promos: HashMap::from([("1.20.1-latest".to_string(), "47.3.12".to_string())]),
        };

        let err = resolve_loader_version(
            "Forge",
            "1.20.1",
            &LoaderVersionRequest::Recommended,
            move || async move { Ok(promos) },
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            InstallError::LoaderVersionNotFound { ref version, .. } if version == "1.20.1-recommended"
        ));
    }

    #[tokio::test]
    async fn concrete_version_skips_the_promotions_fetch() {
        let fetched = Cell::new(false);

        let resolved = resolve_loader_version(
            "Forge",
            "1.20.1",
            &LoaderVersionRequest::parse("47.1.0"),
            || {
                fetched.set(true);
                async { Ok(LoaderPromotions::default()) }
            },
        )
        .await
        .unwrap();

        assert_eq!(resolved, "1.20.1-47.1.0");
        assert!(!fetched.get());
    }

    #[test]
    fn lookup_builds_concrete_version() {
        assert_eq!(
            promotions().lookup("Forge", "1.20.1", "latest").unwrap(),
            "1.20.1-47.3.12"
        );
    }
}
