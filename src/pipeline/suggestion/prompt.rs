//! Prompt builders for the two model-backed suggestion stages.

use std::fmt::Write;

use crate::models::CaseRecord;
use crate::pipeline::text::ellipsize;

/// Answer the similarity judge gives when nothing is similar.
pub const NONE_SIMILAR_ANSWER: &str = "NENHUM";

/// Build the similarity-judge prompt.
///
/// `solution_chars` adds a truncated solution column when set.
pub fn build_similarity_prompt(
    candidates: &[CaseRecord],
    current_problem: &str,
    problem_chars: usize,
    solution_chars: Option<usize>,
    max_selected: usize,
) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "Você é um especialista técnico. Compare o problema atual com problemas históricos \
         e identifique os mais similares.\n\n",
    );
    let _ = write!(prompt, "PROBLEMA ATUAL:\n{}\n\n", current_problem.trim());

    match solution_chars {
        Some(_) => prompt.push_str("PROBLEMAS HISTÓRICOS (formato: ID | Problema | Solução):\n"),
        None => prompt.push_str("PROBLEMAS HISTÓRICOS (formato: ID | Problema):\n"),
    }
    for case in candidates {
        let _ = write!(
            prompt,
            "ID: {} | Problema: {}",
            case.id,
            ellipsize(case.problem.trim(), problem_chars)
        );
        if let Some(max) = solution_chars {
            let _ = write!(prompt, " | Solução: {}", ellipsize(case.solution.trim(), max));
        }
        prompt.push('\n');
    }

    prompt.push_str("\nINSTRUÇÕES:\n");
    prompt.push_str(
        "1. Analise a similaridade com base em: contexto, sintomas, tipo de erro, operação envolvida\n",
    );
    prompt.push_str(
        "2. Ignore semelhanças apenas de palavras: considere similar somente quando o sintoma \
         e o contexto forem equivalentes\n",
    );
    let _ = writeln!(
        prompt,
        "3. Selecione apenas os IDs dos problemas MAIS SIMILARES (máximo {max_selected})"
    );
    prompt.push_str("4. Responda APENAS com os IDs completos separados por vírgula\n");
    prompt.push_str(
        "5. Exemplo de resposta: 3f1c2a9e-8b7d-4c6e-9f01-2a3b4c5d6e7f, 9d8e7f6a-5b4c-4d3e-8f2a-1b0c9d8e7f6a\n",
    );
    let _ = write!(prompt, "6. Se nenhum for similar, responda: {NONE_SIMILAR_ANSWER}");

    prompt
}

/// Build the tip-synthesis prompt.
///
/// Only the first `max_listed` solutions are quoted; the rest are
/// mentioned as a count.
pub fn build_tips_prompt(
    solutions: &[String],
    current_problem: &str,
    max_listed: usize,
    solution_chars: usize,
) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "Você é um técnico sênior. Com base nas soluções aplicadas em problemas similares, \
         gere dicas práticas para resolver o problema atual.\n\n",
    );
    let _ = write!(prompt, "PROBLEMA ATUAL:\n{}\n\n", current_problem.trim());

    prompt.push_str("SOLUÇÕES APLICADAS EM CASOS SIMILARES:\n");
    for (i, solution) in solutions.iter().take(max_listed).enumerate() {
        let _ = write!(
            prompt,
            "Solução {}:\n{}\n---\n",
            i + 1,
            ellipsize(solution.trim(), solution_chars)
        );
    }
    let omitted = solutions.len().saturating_sub(max_listed);
    if omitted > 0 {
        let _ = writeln!(
            prompt,
            "(Mais {omitted} soluções similares foram encontradas e não estão listadas.)"
        );
    }

    prompt.push_str("\nINSTRUÇÕES PARA AS DICAS:\n");
    prompt.push_str("1. Extraia padrões comuns das soluções\n");
    prompt.push_str("2. Liste de 3 a 8 dicas\n");
    prompt.push_str("3. Seja prático e objetivo\n");
    prompt.push_str("4. Inclua verificação de configurações comuns\n");
    prompt.push_str("5. Formato de resposta: cada dica em uma linha começando com •\n");
    prompt.push_str(
        "6. Exemplo:\n• Verifique se o certificado está instalado\n• Confirme a versão do módulo\n",
    );

    prompt
}
