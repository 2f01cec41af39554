mod display;
mod import;
mod interactive;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lecylindre_core::config::SessionConfig;
use lecylindre_core::models::{Pocket, Variant};
use lecylindre_stats::{Report, Session, View};

use crate::display::{display_pocket_table, display_replay_summary, display_report};
use crate::import::{read_spin_log, replay_labels};

#[derive(Parser)]
#[command(name = "lecylindre", about = "Suivi des tirages de roulette et recommandations")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Variante de roulette (prioritaire sur le fichier de configuration)
    #[arg(long, global = true)]
    variant: Option<Variant>,

    /// Fichier de configuration JSON (seuils, variante)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Niveau de détail de l'affichage
    #[arg(long, global = true, default_value = "simple")]
    view: View,
}

#[derive(Subcommand)]
enum Command {
    /// Rejouer un journal de tirages (CSV ou valeurs séparées par des espaces)
    Replay {
        /// Chemin vers le journal
        #[arg(short, long)]
        file: PathBuf,

        /// Sortie JSON au lieu des tableaux
        #[arg(long)]
        json: bool,
    },

    /// Simuler une session de tirages aléatoires
    Simulate {
        /// Nombre de tirages
        #[arg(short = 'n', long, default_value = "100")]
        spins: usize,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        /// Sortie JSON au lieu des tableaux
        #[arg(long)]
        json: bool,
    },

    /// Saisir les tirages un par un
    Interactive,

    /// Afficher les cases de la roulette et leurs propriétés
    Pockets,

    /// Afficher la configuration par défaut (JSON)
    DefaultConfig,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Replay { file, json } => {
            let config = load_config(cli.config.as_deref(), cli.variant)?;
            cmd_replay(config, &file, cli.view, json)
        }
        Command::Simulate { spins, seed, json } => {
            let config = load_config(cli.config.as_deref(), cli.variant)?;
            cmd_simulate(config, spins, seed, cli.view, json)
        }
        Command::Interactive => {
            let config = load_config(cli.config.as_deref(), cli.variant)?;
            let mut session = Session::new(config)?;
            interactive::run_interactive(&mut session, cli.view)
        }
        Command::Pockets => {
            let config = load_config(cli.config.as_deref(), cli.variant)?;
            display_pocket_table(config.variant);
            Ok(())
        }
        Command::DefaultConfig => {
            let config = SessionConfig::new(cli.variant.unwrap_or_default());
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>, variant: Option<Variant>) -> Result<SessionConfig> {
    let mut config = match path {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if let Some(variant) = variant {
        config.variant = variant;
    }
    log::debug!("Configuration : roulette {}", config.variant);
    Ok(config)
}

fn print_report(session: &Session, view: View, json: bool) -> Result<()> {
    let report = Report::build(session, view);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_report(&report);
    }
    Ok(())
}

fn cmd_replay(config: SessionConfig, file: &Path, view: View, json: bool) -> Result<()> {
    let labels = read_spin_log(file)?;
    let mut session = Session::new(config)?;
    let result = replay_labels(&mut session, &labels);
    if !json {
        display_replay_summary(&result);
    }
    print_report(&session, view, json)
}

fn simulate_spins(variant: Variant, n: usize, rng: &mut StdRng) -> Vec<Pocket> {
    let pockets = variant.pockets();
    (0..n)
        .map(|_| pockets[rng.random_range(0..pockets.len())])
        .collect()
}

fn cmd_simulate(
    config: SessionConfig,
    spins: usize,
    seed: Option<u64>,
    view: View,
    json: bool,
) -> Result<()> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let history = simulate_spins(config.variant, spins, &mut rng);
    let session = Session::replay(config, history)?;
    if !json {
        println!("Simulation : {} tirages", session.total_spins());
    }
    print_report(&session, view, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_options() {
        let cli = Cli::try_parse_from([
            "lecylindre",
            "simulate",
            "--spins",
            "50",
            "--seed",
            "7",
            "--variant",
            "american",
            "--view",
            "detailed",
        ])
        .unwrap();
        assert_eq!(cli.variant, Some(Variant::American));
        assert_eq!(cli.view, View::Detailed);
        match cli.command {
            Command::Simulate { spins, seed, json } => {
                assert_eq!(spins, 50);
                assert_eq!(seed, Some(7));
                assert!(!json);
            }
            _ => panic!("sous-commande inattendue"),
        }
    }

    #[test]
    fn test_default_view_is_simple() {
        let cli = Cli::try_parse_from(["lecylindre", "pockets"]).unwrap();
        assert_eq!(cli.view, View::Simple);
        assert!(cli.variant.is_none());
    }

    #[test]
    fn test_load_config_variant_override() {
        let config = load_config(None, Some(Variant::American)).unwrap();
        assert_eq!(config.variant, Variant::American);
        let config = load_config(None, None).unwrap();
        assert_eq!(config.variant, Variant::European);
    }

    #[test]
    fn test_simulate_spins_seeded() {
        let a = simulate_spins(Variant::American, 200, &mut StdRng::seed_from_u64(42));
        let b = simulate_spins(Variant::American, 200, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert!(a.iter().all(|&p| Variant::American.contains(p)));
    }
}
