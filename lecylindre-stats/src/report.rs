use serde::{Deserialize, Serialize};

use lecylindre_core::models::{Pocket, Street, Variant};

use crate::advisor::Recommendation;
use crate::aggregate::distribution::{BasicStats, DozenStats};
use crate::aggregate::hot_cold::PocketStat;
use crate::aggregate::streak::StreakState;
use crate::aggregate::streets::StreetAnalysis;
use crate::session::Session;

/// Niveau de détail exposé à l'affichage. Fourni par l'appelant, ce n'est pas un contrôle d'accès.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Detailed,
    #[default]
    Simple,
}

impl View {
    pub fn is_detailed(&self) -> bool {
        *self == View::Detailed
    }
}

/// Nombre de derniers tirages joints à un rapport détaillé.
pub const RECENT_SPINS: usize = 20;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub variant: Variant,
    pub view: View,
    pub total_spins: usize,
    pub recommendation: Recommendation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_stats: Option<BasicStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streaks: Option<StreakState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dozens: Option<DozenStats>,
    /// Sorties cumulées par transversale depuis le début de la session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_totals: Option<Vec<(Street, u32)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pockets: Option<Vec<PocketStat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streets: Option<StreetAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent: Option<Vec<Pocket>>,
}

impl Report {
    /// La recommandation est la même pour les deux vues ; seule la vue détaillée
    /// joint les agrégats.
    pub fn build(session: &Session, view: View) -> Self {
        let recommendation = session.recommend();
        if !view.is_detailed() {
            return Self {
                variant: session.variant(),
                view,
                total_spins: session.total_spins(),
                recommendation,
                basic_stats: None,
                streaks: None,
                dozens: None,
                street_totals: None,
                pockets: None,
                streets: None,
                commentary: None,
                recent: None,
            };
        }

        Self {
            variant: session.variant(),
            view,
            total_spins: session.total_spins(),
            recommendation,
            basic_stats: Some(session.basic_stats()),
            streaks: Some(session.streaks()),
            dozens: Some(session.dozen_stats()),
            street_totals: session.street_totals(),
            pockets: Some(session.hot_cold()),
            streets: session.analyze_streets(),
            commentary: session.street_commentary(),
            recent: Some(session.recent_spins(RECENT_SPINS)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lecylindre_core::config::SessionConfig;

    fn session(variant: Variant, n: u8) -> Session {
        let pockets = (0..n).map(|i| Pocket::from_number(i % 36 + 1).unwrap());
        Session::replay(SessionConfig::new(variant), pockets).unwrap()
    }

    #[test]
    fn test_simple_view_hides_aggregates() {
        let report = Report::build(&session(Variant::European, 15), View::Simple);
        assert!(report.basic_stats.is_none());
        assert!(report.streets.is_none());
        assert!(report.recent.is_none());
        assert_eq!(report.total_spins, 15);
    }

    #[test]
    fn test_same_recommendation_in_both_views() {
        for variant in [Variant::European, Variant::American] {
            let s = session(variant, 30);
            let simple = Report::build(&s, View::Simple);
            let detailed = Report::build(&s, View::Detailed);
            assert_eq!(simple.recommendation, detailed.recommendation);
        }
    }

    #[test]
    fn test_detailed_view_european() {
        let report = Report::build(&session(Variant::European, 25), View::Detailed);
        assert!(report.basic_stats.is_some());
        assert!(report.streets.is_some());
        assert!(report.commentary.is_some());
        let recent = report.recent.unwrap();
        assert_eq!(recent.len(), RECENT_SPINS);
        // Le plus récent en premier : le 25e tirage est le numéro 25
        assert_eq!(recent[0], Pocket::from_number(25).unwrap());
    }

    #[test]
    fn test_detailed_view_american_has_no_streets() {
        let report = Report::build(&session(Variant::American, 5), View::Detailed);
        assert!(report.streets.is_none());
        assert!(report.street_totals.is_none());
        assert!(report.commentary.is_none());
        assert_eq!(report.pockets.unwrap().len(), 38);
    }

    #[test]
    fn test_simple_report_json() {
        let report = Report::build(&session(Variant::European, 3), View::Simple);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["variant"], "european");
        assert_eq!(json["view"], "simple");
        assert_eq!(json["recommendation"]["decision"]["kind"], "need_more_data");
        assert_eq!(json["recommendation"]["confidence"], "low");
        assert!(json.get("basic_stats").is_none());
        assert!(json.get("street_totals").is_none());
    }

    #[test]
    fn test_detailed_report_json() {
        // Tirages 1, 2, ..., 14 : le plus récent est 14
        let report = Report::build(&session(Variant::European, 14), View::Detailed);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["view"], "detailed");
        assert_eq!(json["total_spins"], 14);
        assert_eq!(json["recommendation"]["decision"]["kind"], "bet_streets");

        let streets = &json["streets"];
        assert_eq!(streets["observed_spins"], 12);
        assert_eq!(streets["all"].as_array().unwrap().len(), 12);
        assert_eq!(streets["all"][0]["street"], 1);
        assert_eq!(streets["all"][0]["numbers"], serde_json::json!([1, 2, 3]));
        // Fenêtre longue : tirages 3 à 14, la transversale 1 n'y a que le 3
        assert_eq!(streets["all"][0]["appearances_in_long_window"], 1);

        assert_eq!(json["street_totals"][0], serde_json::json!([1, 3]));
        assert_eq!(json["street_totals"][4], serde_json::json!([5, 2]));

        let recent = json["recent"].as_array().unwrap();
        assert_eq!(recent.len(), 14);
        assert_eq!(recent[0], "14");
        assert_eq!(recent[13], "1");
        assert_eq!(json["pockets"][0]["pocket"], "0");
        assert_eq!(json["pockets"][0]["color"], "green");
    }
}
