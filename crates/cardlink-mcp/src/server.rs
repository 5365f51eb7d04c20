//! The MCP tool surface.
//!
//! Every tool answers with a single text content item holding JSON. Engine
//! failures are reported inside that JSON rather than as protocol errors, so
//! clients always get a normal tool result and must inspect the body.

use std::sync::Arc;

use cardlink_engine::Engine;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::params::{AddBulkCardsParams, AddCardParams, GetCardsInDeckParams, SearchCardsParams};

/// A failure as reported to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ToolFailure {
    pub error: &'static str,
    pub message: String,
}

impl ToolFailure {
    fn read_only(operation: &str) -> Self {
        Self {
            error: "read_only",
            message: format!(
                "Write operation '{}' is not allowed in read-only mode",
                operation
            ),
        }
    }
}

impl From<cardlink_engine::Error> for ToolFailure {
    fn from(err: cardlink_engine::Error) -> Self {
        Self {
            error: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddCardSuccess {
    success: bool,
    note_id: i64,
    deck_name: String,
    stored_media: Vec<String>,
    message: String,
}

#[derive(Serialize)]
struct AddCardFailure {
    success: bool,
    #[serde(flatten)]
    failure: ToolFailure,
}

fn json_result<T: Serialize>(value: &T) -> CallToolResult {
    let text = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        serde_json::json!({ "error": "serialization", "message": e.to_string() }).to_string()
    });
    CallToolResult::success(vec![Content::text(text)])
}

#[derive(Clone)]
pub struct CardServer {
    engine: Arc<Engine>,
    tool_router: ToolRouter<CardServer>,
    read_only: bool,
}

impl CardServer {
    pub fn new(engine: Engine, read_only: bool) -> Self {
        Self {
            engine: Arc::new(engine),
            tool_router: Self::tool_router(),
            read_only,
        }
    }

    fn check_write(&self, operation: &str) -> Result<(), ToolFailure> {
        if self.read_only {
            warn!("Blocked write operation in read-only mode: {}", operation);
            Err(ToolFailure::read_only(operation))
        } else {
            Ok(())
        }
    }
}

#[tool_router]
impl CardServer {
    #[tool(
        name = "list_anki_decks",
        description = "List all deck names in Anki, in the order Anki returns them."
    )]
    async fn list_anki_decks(&self) -> Result<CallToolResult, McpError> {
        debug!("Listing decks");

        match self.engine.cards().deck_names().await {
            Ok(decks) => {
                debug!(count = decks.len(), "Listed decks");
                Ok(json_result(&decks))
            }
            Err(e) => Ok(json_result(&ToolFailure::from(e))),
        }
    }

    #[tool(
        name = "getCardsInDeck",
        description = "Get a page of cards from a deck. Returns id, front, back, deckName and \
                       state (new, learning, review, suspended or unknown) for each card."
    )]
    async fn get_cards_in_deck(
        &self,
        Parameters(params): Parameters<GetCardsInDeckParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(
            deck = ?params.deck_name,
            limit = params.limit,
            offset = params.offset,
            "Getting cards in deck"
        );

        let result = self
            .engine
            .cards()
            .in_deck(params.deck_name.as_deref(), params.limit, params.offset)
            .await;

        match result {
            Ok(cards) => Ok(json_result(&cards)),
            Err(e) => Ok(json_result(&ToolFailure::from(e))),
        }
    }

    #[tool(
        name = "searchCards",
        description = "Search cards with Anki query syntax (e.g. 'hola' or 'front:hola*'), \
                       optionally within one deck."
    )]
    async fn search_cards(
        &self,
        Parameters(params): Parameters<SearchCardsParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(query = %params.query, deck = ?params.deck_name, "Searching cards");

        let result = self
            .engine
            .cards()
            .search(&params.query, params.deck_name.as_deref())
            .await;

        match result {
            Ok(cards) => {
                debug!(count = cards.len(), "Search finished");
                Ok(json_result(&cards))
            }
            Err(e) => Ok(json_result(&ToolFailure::from(e))),
        }
    }

    #[tool(
        name = "addCard",
        description = "Add one flashcard to an existing deck. Media files are uploaded first; \
                       files that cannot be read are skipped. Reference uploaded files in front \
                       or back as {filename}: audio becomes [sound:filename], images become \
                       <img src=\"filename\">."
    )]
    async fn add_card(
        &self,
        Parameters(params): Parameters<AddCardParams>,
    ) -> Result<CallToolResult, McpError> {
        if let Err(failure) = self.check_write("addCard") {
            return Ok(json_result(&AddCardFailure {
                success: false,
                failure,
            }));
        }
        debug!(
            deck = %params.deck_name,
            card_type = ?params.card_type,
            media = params.media.len(),
            "Adding card"
        );

        let request = params.to_request();
        match self.engine.cards().add(&params.deck_name, &request).await {
            Ok(added) => {
                info!(note_id = added.note_id, "Card added");
                Ok(json_result(&AddCardSuccess {
                    success: true,
                    note_id: added.note_id,
                    message: format!(
                        "Created card {} in deck '{}' with {} media file(s)",
                        added.note_id,
                        added.deck_name,
                        added.stored_media.len()
                    ),
                    deck_name: added.deck_name,
                    stored_media: added.stored_media,
                }))
            }
            Err(e) => Ok(json_result(&AddCardFailure {
                success: false,
                failure: ToolFailure::from(e),
            })),
        }
    }

    #[tool(
        name = "addBulkCards",
        description = "Add many flashcards to one deck with a shared media list. Every media \
                       path must exist or nothing is created. Cards are created in order and \
                       one card failing does not stop the others. Every card is created with \
                       the Basic note type; a per-card cardType is ignored."
    )]
    async fn add_bulk_cards(
        &self,
        Parameters(params): Parameters<AddBulkCardsParams>,
    ) -> Result<CallToolResult, McpError> {
        if let Err(failure) = self.check_write("addBulkCards") {
            return Ok(json_result(&failure));
        }
        debug!(
            deck = %params.deck_name,
            cards = params.cards.len(),
            media = params.media.len(),
            "Adding cards in bulk"
        );

        let request = params.to_request();
        match self.engine.cards().add_bulk(&request).await {
            Ok(result) => Ok(json_result(&result)),
            Err(e) => {
                warn!(error = %e, "Bulk creation aborted");
                Ok(json_result(&ToolFailure::from(e)))
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for CardServer {
    fn get_info(&self) -> ServerInfo {
        let mode = if self.read_only { " (read-only)" } else { "" };
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(format!(
                "Anki flashcards via AnkiConnect{}. \
                 Requires Anki to be running with the AnkiConnect add-on installed. \
                 Tools: list_anki_decks, getCardsInDeck, searchCards, addCard, addBulkCards. \
                 Attach local files with `media` and reference them in card text as {{filename}}.",
                mode
            )),
        }
    }
}
