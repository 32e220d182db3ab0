// src/analyze/prompt.rs
//! Fixed-format instruction prompt for the main analysis call.

use crate::article::Article;

/// System-role persona for the analysis call.
pub const ANALYST_PERSONA: &str = "Você é um analista especializado em inteligência artificial e tecnologia. Sua tarefa é analisar notícias sobre IA e fornecer insights específicos para desenvolvedores de software e empresas do ramo imobiliário/shopping centers. Responda sempre em português brasileiro.";

/// Substituted for a missing title or body.
pub const MISSING_FIELD: &str = "N/A";

pub const HEADING_SUMMARY: &str = "RESUMO EXECUTIVO";
pub const HEADING_KEY_POINTS: &str = "PONTOS-CHAVE";
pub const HEADING_RELEVANCE: &str = "NÍVEL DE RELEVÂNCIA";

fn or_placeholder(s: &str) -> &str {
    if s.trim().is_empty() {
        MISSING_FIELD
    } else {
        s
    }
}

/// Pure: embeds title + content (or summary) and asks for the three headed sections.
pub fn build_analysis_prompt(article: &Article) -> String {
    let title = or_placeholder(&article.title);
    let content = or_placeholder(article.body());
    format!(
        "
Analise a seguinte notícia sobre inteligência artificial e tecnologia:

**Título:** {title}

**Conteúdo:** {content}

Por favor, forneça uma análise estruturada seguindo EXATAMENTE este formato (mantenha os cabeçalhos):

## {HEADING_SUMMARY}
[Resumo da notícia, em português brasileiro]

## {HEADING_KEY_POINTS}
[3-5 pontos principais desta notícia em formato de lista]

## {HEADING_RELEVANCE}
[Alto/Médio/Baixo] - [Justificativa em uma frase]

IMPORTANTE: Responda sempre em português brasileiro e mantenha exatamente os cabeçalhos mostrados acima.
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_fields_and_headings_in_order() {
        let a = Article::new("GPT-5 lançado", "A OpenAI anunciou um novo modelo.");
        let p = build_analysis_prompt(&a);
        assert!(p.contains("**Título:** GPT-5 lançado"));
        assert!(p.contains("**Conteúdo:** A OpenAI anunciou um novo modelo."));
        let s = p.find("## RESUMO EXECUTIVO").unwrap();
        let k = p.find("## PONTOS-CHAVE").unwrap();
        let r = p.find("## NÍVEL DE RELEVÂNCIA").unwrap();
        assert!(s < k && k < r);
        assert!(p.contains("português brasileiro"));
    }

    #[test]
    fn empty_content_uses_summary_then_placeholder() {
        let a = Article::new("", "").with_summary("Só o resumo");
        let p = build_analysis_prompt(&a);
        assert!(p.contains("**Título:** N/A"));
        assert!(p.contains("**Conteúdo:** Só o resumo"));

        let blank = Article::new("", "");
        assert!(build_analysis_prompt(&blank).contains("**Conteúdo:** N/A"));
    }
}
