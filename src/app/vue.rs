// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc pour natif + wasm
// - Tactile : gros boutons en grille
// - Les clics produisent des Commande, appliquées après le dessin
//   (la vue ne modifie la session qu’à un seul endroit)
//
// Bandeau : DEG/RAD, INV, valeur du registre mémoire
// Écran   : expression + résultat (ou "Erreur")
// Touches : mémoire, fonctions, pavé, historique repliable

use eframe::egui;

use super::etat::Session;
use super::AppCalc;
use crate::noyau::formater;

const TAILLE_TOUCHE: [f32; 2] = [64.0, 40.0];
const TAILLE_FONCTION: [f32; 2] = [64.0, 32.0];

#[derive(Clone, Copy, Debug)]
enum Commande {
    Ajouter(&'static str),
    EffacerDernier,
    Effacer,
    Valider,
    BasculerUnite,
    BasculerInverse,
    MemoireEffacer,
    MemoireRappel,
    MemoirePlus,
    MemoireMoins,
    MemoireStocker,
    Historique(usize),
}

/// Rangées de fonctions : (libellé, texte inséré).
const FONCTIONS: [[(&str, &str); 4]; 3] = [
    [("sin", "sin("), ("cos", "cos("), ("tan", "tan("), ("π", "π")],
    [("asin", "asin("), ("acos", "acos("), ("atan", "atan("), ("e", "e")],
    [("log", "log("), ("ln", "ln("), ("abs", "abs("), ("√", "√(")],
];

/// Pavé principal, 5 colonnes.
const PAVE: [[(&str, Commande); 5]; 5] = [
    [
        ("7", Commande::Ajouter("7")),
        ("8", Commande::Ajouter("8")),
        ("9", Commande::Ajouter("9")),
        ("DEL", Commande::EffacerDernier),
        ("C", Commande::Effacer),
    ],
    [
        ("4", Commande::Ajouter("4")),
        ("5", Commande::Ajouter("5")),
        ("6", Commande::Ajouter("6")),
        ("×", Commande::Ajouter("×")),
        ("÷", Commande::Ajouter("÷")),
    ],
    [
        ("1", Commande::Ajouter("1")),
        ("2", Commande::Ajouter("2")),
        ("3", Commande::Ajouter("3")),
        ("+", Commande::Ajouter("+")),
        ("−", Commande::Ajouter("−")),
    ],
    [
        ("0", Commande::Ajouter("0")),
        (".", Commande::Ajouter(".")),
        ("(", Commande::Ajouter("(")),
        (")", Commande::Ajouter(")")),
        ("^", Commande::Ajouter("^")),
    ],
    [
        ("x!", Commande::Ajouter("!")),
        ("%", Commande::Ajouter("%")),
        ("×10^", Commande::Ajouter("×10^")),
        ("x²", Commande::Ajouter("²")),
        ("=", Commande::Valider),
    ],
];

const MEMOIRE: [(&str, Commande); 5] = [
    ("MC", Commande::MemoireEffacer),
    ("MR", Commande::MemoireRappel),
    ("M+", Commande::MemoirePlus),
    ("M−", Commande::MemoireMoins),
    ("MS", Commande::MemoireStocker),
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        let mut commandes = Vec::new();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui_bandeau(ui, &self.session, &mut commandes);
                ui.add_space(4.0);
                ui_ecran(ui, &self.session, self.reglages.taille_texte);
                ui.add_space(8.0);

                ui_rangee(ui, &MEMOIRE, TAILLE_FONCTION, &mut commandes);
                ui.add_space(4.0);
                ui_fonctions(ui, &mut commandes);
                ui.add_space(8.0);
                ui_pave(ui, &mut commandes);

                ui.add_space(8.0);
                ui.separator();
                ui_historique(ui, &self.session, &mut commandes);
            });

        for c in commandes {
            self.appliquer(c);
        }
    }

    fn appliquer(&mut self, commande: Commande) {
        let s = &mut self.session;
        match commande {
            Commande::Ajouter(t) => s.ajouter(t),
            Commande::EffacerDernier => s.effacer_dernier(),
            Commande::Effacer => s.effacer(),
            Commande::Valider => s.valider(),
            Commande::BasculerUnite => s.basculer_unite(),
            Commande::BasculerInverse => s.basculer_inverse(),
            Commande::MemoireEffacer => s.memoire_effacer(),
            Commande::MemoireRappel => s.rappel_memoire(),
            Commande::MemoirePlus => s.memoire_plus(),
            Commande::MemoireMoins => s.memoire_moins(),
            Commande::MemoireStocker => s.memoire_stocker(),
            Commande::Historique(i) => {
                s.utiliser_historique(i);
            }
        }
    }
}

fn ui_bandeau(ui: &mut egui::Ui, s: &Session, commandes: &mut Vec<Commande>) {
    ui.horizontal(|ui| {
        ui.heading("Calculatrice");

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let mut inv = s.inverse;
            if ui.toggle_value(&mut inv, "INV").clicked() {
                commandes.push(Commande::BasculerInverse);
            }
            if ui.button(s.unite.libelle()).clicked() {
                commandes.push(Commande::BasculerUnite);
            }
            if let Some(m) = libelle_memoire(s.memoire) {
                ui.monospace(m).on_hover_text("Registre mémoire");
            }
        });
    });
}

/// Valeur du registre pour le bandeau (rien si nul).
fn libelle_memoire(memoire: f64) -> Option<String> {
    (memoire != 0.0).then(|| format!("M = {}", formater(memoire)))
}

fn ui_ecran(ui: &mut egui::Ui, s: &Session, taille: f32) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                let expression = if s.expression.is_empty() { " " } else { s.expression.as_str() };
                ui.label(
                    egui::RichText::new(expression)
                        .monospace()
                        .size(taille * 0.7)
                        .weak(),
                );

                if s.erreur {
                    ui.label(
                        egui::RichText::new("Erreur")
                            .size(taille)
                            .color(ui.visuals().error_fg_color),
                    );
                } else {
                    ui.label(egui::RichText::new(&s.affichage).monospace().size(taille).strong());
                }
            });
        });
}

fn ui_rangee(
    ui: &mut egui::Ui,
    touches: &[(&str, Commande)],
    taille: [f32; 2],
    commandes: &mut Vec<Commande>,
) {
    ui.horizontal(|ui| {
        for (libelle, c) in touches {
            if ui.add_sized(taille, egui::Button::new(*libelle)).clicked() {
                commandes.push(*c);
            }
        }
    });
}

fn ui_fonctions(ui: &mut egui::Ui, commandes: &mut Vec<Commande>) {
    egui::Grid::new("fonctions_sci")
        .num_columns(4)
        .spacing([6.0, 6.0])
        .show(ui, |ui| {
            for rangee in FONCTIONS {
                for (libelle, texte) in rangee {
                    if ui.add_sized(TAILLE_FONCTION, egui::Button::new(libelle)).clicked() {
                        commandes.push(Commande::Ajouter(texte));
                    }
                }
                ui.end_row();
            }
        });
}

fn ui_pave(ui: &mut egui::Ui, commandes: &mut Vec<Commande>) {
    egui::Grid::new("pave_sci")
        .num_columns(5)
        .spacing([6.0, 6.0])
        .show(ui, |ui| {
            for rangee in PAVE {
                for (libelle, c) in rangee {
                    if ui.add_sized(TAILLE_TOUCHE, egui::Button::new(libelle)).clicked() {
                        commandes.push(c);
                    }
                }
                ui.end_row();
            }
        });
}

fn ui_historique(ui: &mut egui::Ui, s: &Session, commandes: &mut Vec<Commande>) {
    let titre = format!(
        "Historique ({}/{})",
        s.historique.len(),
        s.historique.capacite()
    );
    egui::CollapsingHeader::new(titre)
        .default_open(false)
        .show(ui, |ui| {
            if s.historique.is_empty() {
                ui.weak("vide");
                return;
            }
            for (i, entree) in s.historique.iter().enumerate() {
                let texte = format!("{} = {}", entree.expression, entree.resultat);
                let resp = ui
                    .add(egui::Button::new(egui::RichText::new(texte).monospace()).frame(false))
                    .on_hover_text("Reprendre ce résultat");
                if resp.clicked() {
                    commandes.push(Commande::Historique(i));
                }
            }
        });
}
