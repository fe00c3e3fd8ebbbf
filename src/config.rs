//! Loading agent configuration (prompts + optional extra question-bank
//! items) from TOML.
//!
//! See `AgentConfig`, `Prompts` and `QuestionCfg` for the expected schema.

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::{PoolName, QuestionTemplate};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AgentConfig {
    #[serde(default)]
    pub prompts: Prompts,
    #[serde(default)]
    pub questions: Vec<QuestionCfg>,
}

/// Extra question-bank entry accepted in TOML configuration. Only the
/// fields matching the pool's category should be filled.
#[derive(Clone, Debug, Deserialize)]
pub struct QuestionCfg {
    pub pool: PoolName,
    // conjugation pools
    #[serde(default)]
    pub verb: Option<String>,
    #[serde(default)]
    pub sentence: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    // contraste
    #[serde(default)]
    pub other: Option<String>,
    // identificarError
    #[serde(default)]
    pub options: Option<Vec<String>>,
    // ordenarFrase
    #[serde(default)]
    pub words: Option<Vec<String>>,
}

impl QuestionCfg {
    /// Validate into a bank template for the declared pool. `None` means
    /// the entry is malformed for that category and should be skipped.
    pub fn into_template(self) -> Option<QuestionTemplate> {
        match self.pool {
            PoolName::FormaPura | PoolName::Disparadores => {
                let verb = self.verb.filter(|v| !v.is_empty())?;
                let answer = self.answer.filter(|a| !a.is_empty())?;
                Some(QuestionTemplate::Conjugation {
                    verb,
                    sentence: self.sentence,
                    answer,
                })
            }
            PoolName::Contraste => Some(QuestionTemplate::Contrast {
                sentence: self.sentence.filter(|s| !s.is_empty())?,
                answer: self.answer.filter(|a| !a.is_empty())?,
                other: self.other.filter(|o| !o.is_empty())?,
            }),
            PoolName::IdentificarError => {
                let options = self.options.filter(|o| o.len() >= 2)?;
                let answer = self.answer.filter(|a| options.contains(a))?;
                Some(QuestionTemplate::SpotError { options, answer })
            }
            PoolName::OrdenarFrase => {
                let words = self.words.filter(|w| !w.is_empty())?;
                Some(QuestionTemplate::Ordering { words })
            }
        }
    }
}

/// Prompts used by the OpenAI client. Defaults are sensible for a B1
/// Spanish subjunctive tutor. You can override them in TOML if you need to
/// tune tone/structure.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
    // Error-pattern diagnosis over accumulated attempts
    pub feedback_system: String,
    pub feedback_user_template: String,
    // Free-form tutor chat
    pub tutor_system: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            feedback_system: "Actúa como un tutor de español B1 experto, amigable y motivador. Tu objetivo es analizar los errores del estudiante. Identifica el patrón de error más frecuente (ej. 'Confunde Indicativo con Subjuntivo', 'Error en irregulares como ser/ir/haber'). Ofrece una explicación concisa (máximo 4 frases) y muy clara sobre la regla que se está fallando y un consejo práctico. Muestra ánimo al estudiante. El output debe ser solo el texto del análisis. Usa párrafos para separar ideas.".into(),
            feedback_user_template: "Analiza los siguientes {count} errores, identifica el patrón principal y explica la regla de forma simple:\n\n{errors}".into(),
            tutor_system: "Eres un tutor de gramática española, especializado en el presente de subjuntivo. Responde de forma breve (2-4 frases), en español sencillo de nivel B1, con un ejemplo cuando ayude. No inventes reglas.".into(),
        }
    }
}

/// Attempt to load `AgentConfig` from AGENT_CONFIG_PATH. On any parsing/IO
/// error, returns None.
pub fn load_agent_config_from_env() -> Option<AgentConfig> {
    let path = std::env::var("AGENT_CONFIG_PATH").ok()?;
    match std::fs::read_to_string(&path) {
        Ok(s) => match toml::from_str::<AgentConfig>(&s) {
            Ok(cfg) => {
                info!(target: "ojala_backend", %path, "Loaded agent config (TOML)");
                Some(cfg)
            }
            Err(e) => {
                error!(target: "ojala_backend", %path, error = %e, "Failed to parse TOML config");
                None
            }
        },
        Err(e) => {
            error!(target: "ojala_backend", %path, error = %e, "Failed to read TOML config file");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_entries_parse_per_category() {
        let cfg: AgentConfig = toml::from_str(
            r#"
            [[questions]]
            pool = "disparadores"
            verb = "(tú, bailar)"
            sentence = "Quiero que __________ (bailar, tú) conmigo."
            answer = "bailes"

            [[questions]]
            pool = "ordenarFrase"
            words = ["Ojalá", "que", "ganes"]

            [[questions]]
            pool = "contraste"
            sentence = "Creo que __________ razón."
            answer = "tienes"
            other = "tengas"
            "#,
        )
        .unwrap();

        let templates: Vec<QuestionTemplate> = cfg
            .questions
            .into_iter()
            .filter_map(QuestionCfg::into_template)
            .collect();
        assert_eq!(templates.len(), 3);
        assert!(matches!(templates[0], QuestionTemplate::Conjugation { .. }));
        assert!(matches!(templates[1], QuestionTemplate::Ordering { .. }));
        assert!(matches!(templates[2], QuestionTemplate::Contrast { .. }));
    }

    #[test]
    fn malformed_entries_are_rejected() {
        // Conjugation entry without a verb descriptor.
        let missing_verb = QuestionCfg {
            pool: PoolName::FormaPura,
            verb: None,
            sentence: None,
            answer: Some("hable".into()),
            other: None,
            options: None,
            words: None,
        };
        assert!(missing_verb.into_template().is_none());

        // Spot-the-error entry whose answer is not among its options.
        let stray_answer = QuestionCfg {
            pool: PoolName::IdentificarError,
            verb: None,
            sentence: None,
            answer: Some("Espero que vengas.".into()),
            other: None,
            options: Some(vec!["A.".into(), "B.".into()]),
            words: None,
        };
        assert!(stray_answer.into_template().is_none());
    }

    #[test]
    fn default_prompts_are_templated() {
        let p = Prompts::default();
        assert!(p.feedback_user_template.contains("{count}"));
        assert!(p.feedback_user_template.contains("{errors}"));
    }
}
