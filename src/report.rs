use serde::{Deserialize, Serialize};

/// Top-level keys a raw payload must carry to be accepted as a report.
/// Field names below match the wire keys produced by the generation pipeline.
pub const MATURITY_KEY: &str = "analise_de_maturidade";
pub const ACTIONS_KEY: &str = "acoes_recomendadas";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub analise_de_maturidade: MaturityAnalysis,
    pub acoes_recomendadas: Vec<RecommendedAction>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaturityAnalysis {
    #[serde(default)]
    pub status_geral: String,
    #[serde(default)]
    pub foco: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendedAction {
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub descricao: String,
    #[serde(default)]
    pub acao_especifica: String,
}
