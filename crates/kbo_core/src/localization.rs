//! Matrix label localization
//!
//! Fluent (FTL) 기반 다국어 라벨: 분류 태그 → 표시 문자열
//!
//! The numeric core never produces display text; this module maps
//! the closed classification/banner enums to localized strings. The
//! FTL catalogs are embedded so the engine needs no file I/O.

use crate::error::MatrixError;
use crate::matrix::classify::{CellOutcome, CellTag};
use crate::matrix::render::{BannerStage, BannerSub};
use fluent::{FluentArgs, FluentBundle, FluentResource};
use fluent_langneg::{negotiate_languages, NegotiationStrategy};
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

/// 지원 언어 (first entry is the fallback)
pub const SUPPORTED_LOCALES: &[&str] = &["ko-KR", "en-US"];

const KO_KR_FTL: &str = include_str!("../locales/ko-KR.ftl");
const EN_US_FTL: &str = include_str!("../locales/en-US.ftl");

/// Label catalog for matrix cells and banners.
pub struct MatrixLocalizer {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
    current_locale: String,
    fallback_locale: String,
}

impl Default for MatrixLocalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixLocalizer {
    /// Localizer with the embedded catalogs loaded, ko-KR current.
    pub fn new() -> Self {
        let mut localizer = Self {
            bundles: HashMap::new(),
            current_locale: "ko-KR".to_string(),
            fallback_locale: "ko-KR".to_string(),
        };
        for (locale, content) in [("ko-KR", KO_KR_FTL), ("en-US", EN_US_FTL)] {
            if let Err(e) = localizer.load_locale(locale, content) {
                // Embedded catalogs only fail if the FTL itself is broken
                log::warn!("failed to load embedded locale {}: {}", locale, e);
            }
        }
        localizer
    }

    /// Load one locale's FTL resource into the catalog.
    pub fn load_locale(&mut self, locale: &str, ftl_content: &str) -> Result<(), MatrixError> {
        let resource = FluentResource::try_new(ftl_content.to_string())
            .map_err(|_| MatrixError::LocalizationError("failed to parse FTL content".into()))?;

        let lang_id: LanguageIdentifier = locale
            .parse()
            .map_err(|_| MatrixError::LocalizationError(format!("invalid locale: {}", locale)))?;

        let mut bundle = FluentBundle::new(vec![lang_id]);
        // Labels land in table cells; bidi isolation marks would leak
        // into the rendered text.
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).map_err(|_| {
            MatrixError::LocalizationError("failed to add resource to bundle".into())
        })?;

        self.bundles.insert(locale.to_string(), bundle);
        Ok(())
    }

    /// Switch the current locale; the locale must be loaded.
    pub fn set_locale(&mut self, locale: &str) -> Result<(), MatrixError> {
        if !self.bundles.contains_key(locale) {
            return Err(MatrixError::LocalizationError(format!(
                "locale {} not loaded",
                locale
            )));
        }
        self.current_locale = locale.to_string();
        Ok(())
    }

    pub fn current_locale(&self) -> &str {
        &self.current_locale
    }

    /// Negotiate the closest supported locale for a requested tag and
    /// switch to it. Unknown requests fall back to the fallback locale.
    pub fn negotiate(&mut self, requested: &str) -> String {
        let requested_ids: Vec<LanguageIdentifier> =
            requested.parse().map(|id| vec![id]).unwrap_or_default();
        let available: Vec<LanguageIdentifier> = self
            .bundles
            .keys()
            .filter_map(|l| l.parse().ok())
            .collect();
        let fallback: LanguageIdentifier = match self.fallback_locale.parse() {
            Ok(id) => id,
            Err(_) => return self.current_locale.clone(),
        };

        let negotiated = negotiate_languages(
            &requested_ids,
            &available,
            Some(&fallback),
            NegotiationStrategy::Filtering,
        );
        if let Some(best) = negotiated.first() {
            self.current_locale = best.to_string();
        }
        self.current_locale.clone()
    }

    /// Label for one classified cell. Numeric tags render their value
    /// directly; the rank argument feeds the confirmed/impossible
    /// messages (merged cells pass the representative rank of the run).
    pub fn cell_label(&self, outcome: &CellOutcome, rank: u8) -> String {
        match outcome.tag {
            CellTag::Safe | CellTag::SelfLimited => outcome.value.to_string(),
            CellTag::Confirmed => self.format_with_rank("cell-confirmed", rank),
            CellTag::Impossible => self.format_with_rank("cell-impossible", rank),
        }
    }

    pub fn banner_stage(&self, stage: BannerStage) -> String {
        let key = match stage {
            BannerStage::KoreanSeries => "banner-stage-korean-series",
            BannerStage::PlayoffDirect => "banner-stage-playoff-direct",
            BannerStage::SemiPlayoff => "banner-stage-semi-playoff",
            BannerStage::Wildcard => "banner-stage-wildcard",
            BannerStage::PostseasonFail => "banner-stage-postseason-fail",
        };
        self.format(key, None)
    }

    pub fn banner_sub(&self, sub: BannerSub) -> String {
        match sub {
            BannerSub::RankConfirmed(rank) => self.format_with_rank("banner-sub-rank-confirmed", rank),
            BannerSub::RankOrBetterSecured(rank) => {
                self.format_with_rank("banner-sub-rank-secured", rank)
            }
        }
    }

    fn format_with_rank(&self, key: &str, rank: u8) -> String {
        let mut args = FluentArgs::new();
        args.set("rank", rank as i64);
        self.format(key, Some(&args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs>) -> String {
        let bundle = self
            .bundles
            .get(&self.current_locale)
            .or_else(|| self.bundles.get(&self.fallback_locale));

        if let Some(bundle) = bundle {
            if let Some(pattern) = bundle.get_message(key).and_then(|m| m.value()) {
                let mut errors = Vec::new();
                return bundle.format_pattern(pattern, args, &mut errors).into_owned();
            }
        }
        // Missing message: surface the key rather than an empty cell
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(tag: CellTag, value: u32) -> CellOutcome {
        CellOutcome { tag, value }
    }

    #[test]
    fn test_korean_cell_labels() {
        let loc = MatrixLocalizer::new();
        assert_eq!(loc.cell_label(&outcome(CellTag::Confirmed, 0), 2), "2위 확보");
        assert_eq!(loc.cell_label(&outcome(CellTag::Impossible, 0), 7), "7위 불가");
        assert_eq!(loc.cell_label(&outcome(CellTag::Safe, 13), 3), "13");
        assert_eq!(loc.cell_label(&outcome(CellTag::SelfLimited, 9), 4), "9");
    }

    #[test]
    fn test_english_banner_labels() {
        let mut loc = MatrixLocalizer::new();
        loc.set_locale("en-US").unwrap();
        assert_eq!(
            loc.banner_stage(BannerStage::PostseasonFail),
            "Eliminated from postseason"
        );
        assert_eq!(
            loc.banner_sub(BannerSub::RankConfirmed(10)),
            "Regular season rank 10 confirmed"
        );
        assert_eq!(
            loc.banner_sub(BannerSub::RankOrBetterSecured(2)),
            "Regular season rank 2 or better secured"
        );
    }

    #[test]
    fn test_locale_negotiation() {
        let mut loc = MatrixLocalizer::new();
        assert_eq!(loc.negotiate("en"), "en-US");
        assert_eq!(loc.negotiate("ko"), "ko-KR");
        // unknown locale keeps the fallback
        assert_eq!(loc.negotiate("fr-FR"), "ko-KR");
    }

    #[test]
    fn test_unknown_locale_rejected() {
        let mut loc = MatrixLocalizer::new();
        assert!(loc.set_locale("ja-JP").is_err());
    }
}
