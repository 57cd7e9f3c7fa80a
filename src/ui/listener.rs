// ui/listener.rs

use crate::search::GenerativeSearch;
use crate::ui::command_handler::{HELP_TEXT, Flow, handle_command, parse_command};
use crate::ui::render::render_state;
use crate::ui::session::SearchSession;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

async fn emit<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> std::io::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    output.write_all(text.as_bytes()).await?;
    output.flush().await
}

/// Reads commands line by line and prints the screen whenever a search settles.
///
/// Input and the pending search are watched together, so a line typed while a
/// search runs is handled right away (and refused if it is another search).
/// On end of input a pending search is still awaited; `:quit` abandons it.
pub async fn listen_for_commands<C, R, W>(
    mut session: SearchSession<C>,
    input: R,
    mut output: W,
) -> std::io::Result<()>
where
    C: GenerativeSearch + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut image = None;
    emit(&mut output, HELP_TEXT).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed");
                    break;
                };
                match handle_command(parse_command(&line), &mut session, &mut image) {
                    Flow::Continue(text) => emit(&mut output, &text).await?,
                    Flow::Quit => return Ok(()),
                }
            }
            _ = session.wait_in_flight(), if session.is_busy() => {
                emit(&mut output, &render_state(session.state())).await?;
            }
        }
    }

    if session.is_busy() {
        session.wait_in_flight().await;
        emit(&mut output, &render_state(session.state())).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarketConfig;
    use crate::model::{GeminiError, GenerationReply, GenerationRequest};
    use crate::search::SearchOrchestrator;
    use crate::ui::state::FIXED_ERROR_MESSAGE;
    use std::sync::Arc;
    use tokio::io::BufReader;

    struct CannedModel(Result<&'static str, ()>);

    #[async_trait::async_trait]
    impl GenerativeSearch for CannedModel {
        async fn generate(&self, _req: &GenerationRequest) -> Result<GenerationReply, GeminiError> {
            match self.0 {
                Ok(text) => Ok(GenerationReply {
                    text: text.to_string(),
                    citation_uris: vec!["https://www.jarir.com/p".into()],
                }),
                Err(()) => Err(GeminiError::Api {
                    status: 500,
                    body: String::new(),
                }),
            }
        }
    }

    async fn run(model: CannedModel, input: &str) -> String {
        let orchestrator = Arc::new(SearchOrchestrator::new(model, MarketConfig::default()));
        let session = SearchSession::new(orchestrator);
        let mut out = Vec::new();
        listen_for_commands(session, BufReader::new(input.as_bytes()), &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn search_then_end_of_input_prints_results() {
        let out = run(
            CannedModel(Ok("STORE: Jarir | PRICE: 3499 | CURRENCY: SAR | LINK: https://jarir.com/p | NOTES: -")),
            "iPad Air\n",
        )
        .await;

        assert!(out.starts_with(HELP_TEXT));
        assert!(out.contains("جاري البحث"));
        assert!(out.contains("Jarir  —  3499 SAR"));
        assert!(out.contains("المصادر: jarir.com"));
    }

    #[tokio::test]
    async fn failure_prints_fixed_message() {
        let out = run(CannedModel(Err(())), "TV\n").await;
        assert!(out.contains(FIXED_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn quit_stops_without_searching() {
        let out = run(CannedModel(Ok("")), ":quit\nTV\n").await;
        assert_eq!(out, HELP_TEXT);
    }

    #[tokio::test]
    async fn empty_line_without_image_prints_nothing() {
        let out = run(CannedModel(Ok("")), "\n\n").await;
        assert_eq!(out, HELP_TEXT);
    }
}
