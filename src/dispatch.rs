//! Request dispatch: strategy selection, transport calls, and the
//! single→batch fallback.
//!
//! A dispatch produces one outcome per query, in query order. Failures
//! split two ways: a transport or envelope-level parse failure is a
//! dispatcher-level error (the whole attempt failed, nothing per-item
//! exists); a readable reply with one bad slice yields a per-item failure
//! in that slot and leaves the others intact. The fallback budget is one
//! batch retry after a failed single attempt, nothing more.

use tracing::{debug, warn};

use crate::error::{ItemError, Result};
use crate::input::ResolvedQuery;
use crate::options::ResolvedOptions;
use crate::protocol::{
    batch_request, parse_batch_item, parse_single, single_request, split_batch_reply, Translation,
};
use crate::transport::merge_request_options;

/// Success or failure for exactly one query, prior to shape reassembly.
pub(crate) type Outcome = std::result::Result<Translation, ItemError>;

/// Issue the right strategy for `queries` and return ordered outcomes.
pub(crate) async fn dispatch(
    queries: &[ResolvedQuery],
    options: &ResolvedOptions,
) -> Result<Vec<Outcome>> {
    if queries.len() == 1 && !options.force_batch {
        debug!("dispatching one query via the single endpoint");
        match single_strategy(&queries[0], options).await {
            Ok(translation) => return Ok(vec![Ok(translation)]),
            Err(e) if options.fallback_batch => {
                warn!("single endpoint failed ({}), falling back to batch", e);
            }
            Err(e) => return Err(e),
        }
    } else {
        debug!("dispatching {} queries via the batch endpoint", queries.len());
    }
    batch_strategy(queries, options).await
}

/// One transport call against the single-item endpoint.
pub(crate) async fn single_strategy(
    query: &ResolvedQuery,
    options: &ResolvedOptions,
) -> Result<Translation> {
    let (url, init) = single_request(query, &options.tld);
    let init = merge_request_options(init, &options.request_options);
    let response = options.request_function.request(&url, &init).await?;
    parse_single(&response.json()?, query, options.raw)
}

/// One transport call against the batch endpoint, carrying every query.
pub(crate) async fn batch_strategy(
    queries: &[ResolvedQuery],
    options: &ResolvedOptions,
) -> Result<Vec<Outcome>> {
    let (url, init) = batch_request(queries, &options.tld);
    let init = merge_request_options(init, &options.request_options);
    let response = options.request_function.request(&url, &init).await?;

    let slots = split_batch_reply(&response.text(), queries.len())?;

    let outcomes = slots
        .into_iter()
        .zip(queries)
        .enumerate()
        .map(|(index, (slot, query))| match slot {
            Ok(payload) => {
                let parsed = parse_batch_item(&payload, query, options.raw);
                if let Err(e) = &parsed {
                    warn!("item {} of batch reply is unusable: {}", index, e);
                }
                parsed
            }
            Err(e) => {
                warn!("item {} missing from batch reply: {}", index, e);
                Err(e)
            }
        })
        .collect();

    Ok(outcomes)
}
