//! Multi-call pagination driver

use super::link::{cursor_from_url, find_link};
use super::types::PagerState;
use crate::error::Result;
use crate::http::{with_deadline, ApiResponse, CallOptions, Session};
use crate::request::RequestDescriptor;
use crate::types::{Direction, JsonValue, TotalPages};
use tracing::{debug, info, warn};

/// Follows cursor links for one list request
#[derive(Debug, Clone, Copy)]
pub struct Pager<'a> {
    session: &'a Session,
    options: CallOptions,
}

impl<'a> Pager<'a> {
    /// Pager over `session` with no deadline
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            options: CallOptions::default(),
        }
    }

    /// Apply per-call options; the deadline covers every page
    pub fn with_options(mut self, options: CallOptions) -> Self {
        self.options = options;
        self
    }

    /// Fetch up to `total_pages` pages, walking in `direction`
    ///
    /// Items from every page are returned in arrival order. Any failure
    /// discards what was collected so far.
    pub async fn paginate(
        &self,
        template: &RequestDescriptor,
        total_pages: TotalPages,
        direction: Direction,
    ) -> Result<Vec<JsonValue>> {
        with_deadline(
            self.options.deadline,
            self.run(template, total_pages, direction),
        )
        .await
    }

    async fn run(
        &self,
        template: &RequestDescriptor,
        total_pages: TotalPages,
        direction: Direction,
    ) -> Result<Vec<JsonValue>> {
        let mut items = Vec::new();
        let mut pages = 0u32;
        let mut last_cursor: Option<String> = None;
        let mut state = PagerState::Start;

        loop {
            state = match state {
                PagerState::Start => PagerState::Fetching(template.clone()),
                PagerState::Fetching(request) => match self.session.execute(&request).await {
                    Ok(response) => {
                        pages += 1;
                        let next = next_state(
                            &response,
                            pages,
                            total_pages,
                            direction,
                            last_cursor.as_deref(),
                        );
                        append_items(&mut items, response.into_body());
                        next
                    }
                    Err(e) => PagerState::Failed(e),
                },
                PagerState::HasMore { cursor } => {
                    debug!(
                        "{} fetching page {} ({}={})",
                        template.operation(),
                        pages + 1,
                        direction.cursor_param(),
                        cursor
                    );
                    let request = template.with_cursor(direction, &cursor);
                    last_cursor = Some(cursor);
                    PagerState::Fetching(request)
                }
                PagerState::Exhausted => {
                    info!(
                        "{} fetched {} page(s), {} item(s)",
                        template.operation(),
                        pages,
                        items.len()
                    );
                    return Ok(items);
                }
                PagerState::Failed(e) => return Err(e),
            };
        }
    }
}

fn next_state(
    response: &ApiResponse,
    pages: u32,
    total_pages: TotalPages,
    direction: Direction,
    last_cursor: Option<&str>,
) -> PagerState {
    if total_pages.reached(pages) {
        return PagerState::Exhausted;
    }

    let Some(link) = find_link(response.headers(), direction.rel()) else {
        return PagerState::Exhausted;
    };

    match cursor_from_url(&link, direction.cursor_param()) {
        Some(cursor) if last_cursor == Some(cursor.as_str()) => {
            warn!(
                "{} link repeats cursor {}, stopping",
                direction.rel(),
                cursor
            );
            PagerState::Exhausted
        }
        Some(cursor) => PagerState::HasMore { cursor },
        None => {
            debug!("{} link without a cursor, stopping: {}", direction.rel(), link);
            PagerState::Exhausted
        }
    }
}

/// Add one page body to the accumulated result
///
/// Arrays contribute their elements, objects with an `items` array
/// contribute those items, `null` contributes nothing and any other body is
/// kept as a single item.
pub fn append_items(items: &mut Vec<JsonValue>, body: JsonValue) {
    match body {
        JsonValue::Array(page) => items.extend(page),
        JsonValue::Object(mut object)
            if object.get("items").is_some_and(JsonValue::is_array) =>
        {
            if let Some(JsonValue::Array(page)) = object.remove("items") {
                items.extend(page);
            }
        }
        JsonValue::Null => {}
        other => items.push(other),
    }
}
