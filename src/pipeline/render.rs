use crate::report::Report;

const PAGE_STYLE: &str = "\
body { font-family: Georgia, 'Times New Roman', serif; background: #f4f1ea; \
margin: 0; padding: 2rem 1rem; }\n\
.document { max-width: 720px; margin: 0 auto; background: #fff; \
padding: 2.5rem 3rem; box-shadow: 0 1px 4px rgba(0,0,0,.15); }\n\
h1 { font-size: 1.5rem; border-bottom: 2px solid #333; padding-bottom: .5rem; }\n\
.foco { font-style: italic; color: #555; margin-bottom: 2rem; }\n\
.acao { margin-bottom: 1.5rem; }\n\
.acao h2 { font-size: 1.1rem; margin-bottom: .25rem; }\n\
.acao .area { font-weight: normal; color: #777; }\n\
.tatica { background: #fff3b0; padding: .15rem .3rem; }\n\
.erro { color: #a33; }";

/// Renders the normalized report as a standalone HTML document: a header with
/// the overall maturity status and focus, then the recommended actions
/// numbered from 1. Pure projection, the report is never modified.
pub fn render_report(report: &Report) -> String {
    let mut body = String::new();

    body.push_str(&format!(
        "<h1>Maturidade: {}</h1>\n",
        escape(&report.analise_de_maturidade.status_geral)
    ));
    body.push_str(&format!(
        "<p class=\"foco\">Foco: {}</p>\n",
        escape(&report.analise_de_maturidade.foco)
    ));

    for (i, acao) in report.acoes_recomendadas.iter().enumerate() {
        body.push_str("<div class=\"acao\">\n");
        body.push_str(&format!(
            "<h2>{}. {} <span class=\"area\">({})</span></h2>\n",
            i + 1,
            escape(&acao.titulo),
            escape(&acao.area)
        ));
        body.push_str(&format!("<p>{}</p>\n", escape(&acao.descricao)));
        body.push_str(&format!(
            "<p>Ação Tática: <span class=\"tatica\">{}</span></p>\n",
            escape(&acao.acao_especifica)
        ));
        body.push_str("</div>\n");
    }

    page("Relatório de Maturidade", &body)
}

/// Error counterpart of [`render_report`]; the activation always resolves to
/// either a rendered report or a rendered message.
pub fn render_error(message: &str) -> String {
    let body = format!("<p class=\"erro\">{}</p>\n", escape(message));
    page("Relatório indisponível", &body)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>\n{}\n</style>\n</head>\n\
         <body>\n<div class=\"document\">\n{}</div>\n</body>\n</html>\n",
        escape(title),
        PAGE_STYLE,
        body
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{MaturityAnalysis, RecommendedAction, Report};

    fn sample_report() -> Report {
        Report {
            analise_de_maturidade: MaturityAnalysis {
                status_geral: "Inicial".into(),
                foco: "Vendas".into(),
            },
            acoes_recomendadas: vec![
                RecommendedAction {
                    titulo: "Mapear funil".into(),
                    area: "Comercial".into(),
                    descricao: "Documentar as etapas de venda.".into(),
                    acao_especifica: "Criar planilha do funil".into(),
                },
                RecommendedAction {
                    titulo: "Organizar caixa".into(),
                    area: "Financeiro".into(),
                    descricao: "Separar contas PF e PJ.".into(),
                    acao_especifica: "Abrir conta PJ".into(),
                },
            ],
        }
    }

    #[test]
    fn test_render_report_header() {
        let html = render_report(&sample_report());
        assert!(html.contains("Maturidade: Inicial"));
        assert!(html.contains("Foco: Vendas"));
    }

    #[test]
    fn test_render_report_numbers_actions_from_one() {
        let html = render_report(&sample_report());
        assert!(html.contains("1. Mapear funil"));
        assert!(html.contains("2. Organizar caixa"));
    }

    #[test]
    fn test_render_report_area_is_parenthesized() {
        let html = render_report(&sample_report());
        assert!(html.contains("(Comercial)"));
        assert!(html.contains("(Financeiro)"));
    }

    #[test]
    fn test_render_report_highlights_tactical_action() {
        let html = render_report(&sample_report());
        assert!(html.contains("Ação Tática: <span class=\"tatica\">Criar planilha do funil</span>"));
    }

    #[test]
    fn test_render_escapes_payload_text() {
        let mut report = sample_report();
        report.acoes_recomendadas[0].titulo = "<script>alert(1)</script>".into();
        let html = render_report(&report);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_error_contains_message() {
        let html = render_error("No report found for user abc.");
        assert!(html.contains("No report found for user abc."));
        assert!(html.contains("erro"));
    }
}
