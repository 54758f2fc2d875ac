//! src/app/reglages.rs
//!
//! Réglages de démarrage (unité d’angle, taille d’historique, taille du texte).
//!
//! Natif : lus dans `<config_dir>/calculatrice-sci/reglages.toml`.
//! Fichier absent => défauts ; fichier invalide => avertissement + défauts.
//! Web : défauts seulement.

use serde::Deserialize;

use super::historique::CAPACITE_DEFAUT;
use crate::noyau::UniteAngle;

const TAILLE_TEXTE_DEFAUT: f32 = 28.0;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Reglages {
    pub unite_angle: UniteAngle,
    pub capacite_historique: usize,
    /// Taille (points) de l’expression et du résultat.
    pub taille_texte: f32,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            unite_angle: UniteAngle::default(),
            capacite_historique: CAPACITE_DEFAUT,
            taille_texte: TAILLE_TEXTE_DEFAUT,
        }
    }
}

impl Reglages {
    /// Ramène les valeurs dans des bornes raisonnables.
    pub fn borne(mut self) -> Self {
        self.capacite_historique = self.capacite_historique.clamp(1, 200);
        self.taille_texte = if self.taille_texte.is_finite() {
            self.taille_texte.clamp(12.0, 64.0)
        } else {
            TAILLE_TEXTE_DEFAUT
        };
        self
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use natif::ErreurReglages;

#[cfg(not(target_arch = "wasm32"))]
mod natif {
    use std::path::{Path, PathBuf};
    use std::{fs, io};

    use thiserror::Error;
    use tracing::{debug, warn};

    use super::Reglages;

    const DOSSIER: &str = "calculatrice-sci";
    const FICHIER: &str = "reglages.toml";

    #[derive(Debug, Error)]
    pub enum ErreurReglages {
        #[error("lecture de {chemin}: {source}")]
        Lecture {
            chemin: PathBuf,
            #[source]
            source: io::Error,
        },
        #[error("format: {0}")]
        Format(#[from] toml::de::Error),
    }

    impl Reglages {
        pub fn chemin() -> Option<PathBuf> {
            dirs::config_dir().map(|d| d.join(DOSSIER).join(FICHIER))
        }

        /// N’échoue jamais : toute erreur est journalisée puis remplacée par les défauts.
        pub fn charger() -> Self {
            let Some(chemin) = Self::chemin() else {
                debug!("pas de dossier de configuration");
                return Self::default();
            };
            if !chemin.exists() {
                debug!(chemin = %chemin.display(), "réglages absents, défauts");
                return Self::default();
            }

            match Self::lire(&chemin) {
                Ok(r) => r,
                Err(e) => {
                    warn!(erreur = %e, "réglages ignorés");
                    Self::default()
                }
            }
        }

        pub fn lire(chemin: &Path) -> Result<Self, ErreurReglages> {
            let texte = fs::read_to_string(chemin).map_err(|source| ErreurReglages::Lecture {
                chemin: chemin.to_path_buf(),
                source,
            })?;
            Self::depuis_toml(&texte)
        }

        pub fn depuis_toml(texte: &str) -> Result<Self, ErreurReglages> {
            let r: Reglages = toml::from_str(texte)?;
            Ok(r.borne())
        }
    }
}
