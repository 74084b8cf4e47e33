pub(crate) const VALID_DOCUMENT: &str = "*[VERSÍCULOS]*

*João 3:16-17 (NVI)*

16 - Porque Deus tanto amou o mundo que deu o seu Filho Unigênito.
17 - Pois Deus enviou o seu Filho ao mundo, não para condenar o mundo.

*[CONTEXTO]*
Jesus conversa à noite com Nicodemos, um mestre da lei, e revela que a salvação nasce do amor.

*[PARA PENSAR]*

O que te impede de receber esse amor hoje?
Que atitude precisa mudar para viver como alguém amado?";

/// Drop every line equal (after trimming) to `line`.
pub(crate) fn without_line(document: &str, line: &str) -> String {
    document.lines().filter(|l| l.trim() != line).collect::<Vec<_>>().join("\n")
}
