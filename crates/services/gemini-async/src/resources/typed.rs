use backon::BackoffBuilder;
use tracing::{debug, info, warn};

use crate::{
    client::Client,
    config::Config,
    directive::{self, Dispatch},
    error::GeminiError,
    types::{
        Content, FinishReason, FunctionResponse, GenerateContentRequest, Part, Tool, TypedValue,
    },
};

/// Typed query over `generateContent`
///
/// The query is sent with the five type directives (plus any registered extensions) as
/// callable functions. The model signals the shape of its answer by calling one of them.
pub struct TypedQuery<'c, C: Config> {
    client: &'c Client<C>,
}

/// What the exchange left behind for the fallback answer
struct Collected {
    text: Option<String>,
    finish_reason: Option<FinishReason>,
}

impl From<Part> for Collected {
    fn from(part: Part) -> Self {
        Self {
            text: part.text,
            finish_reason: None,
        }
    }
}

impl<'c, C: Config> TypedQuery<'c, C> {
    /// Creates a new `TypedQuery` resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Asks the model and returns its answer typed by the directive it selects
    ///
    /// Each attempt sends the whole conversation so far and spends one unit of the retry
    /// budget (5 by default):
    ///
    /// - A type directive call returns its value immediately.
    /// - An extension call appends the model turn and a function-response turn, then asks
    ///   again.
    /// - Any other reply ends the exchange. Its last text part is split into trimmed
    ///   lines ([`TypedValue::Lines`]).
    /// - No text, or a `RECITATION` / `OTHER` finish, gives [`TypedValue::NoValues`].
    ///
    /// An HTTP 500 consumes an attempt and is retried after a backoff delay. When the
    /// budget runs out on a 500 the exchange ends as above rather than failing. Earlier
    /// clients re-ran the whole query on each 500 and dropped its result. That result is
    /// still not used here; only the attempt count is kept.
    ///
    /// # Errors
    ///
    /// - [`GeminiError::Api`] for any non-200 status other than 500. Its `Display` is the
    ///   raw response body.
    /// - [`GeminiError::UnknownFunction`] if the model calls an undeclared function.
    /// - [`GeminiError::Reqwest`] for transport failures.
    /// - [`GeminiError::Serde`] for undecodable bodies.
    /// - [`GeminiError::Config`] without credentials.
    pub async fn run(&self, query: impl Into<String>) -> Result<TypedValue, GeminiError> {
        let declarations = directive::function_declarations(self.client.extensions());
        let mut request =
            GenerateContentRequest::new(query).with_tools(vec![Tool::new(declarations)]);

        let mut collected: Vec<Collected> = Vec::new();
        let mut delays = self.client.backoff().build();
        let mut budget = self.client.retry_budget();
        let mut attempt = 0_u32;

        while budget > 0 {
            budget -= 1;
            attempt += 1;
            debug!(
                attempt,
                remaining = budget,
                turns = request.contents.len(),
                "Sending generateContent request"
            );

            let response = match self.client.generate_content().create(&request).await {
                Ok(response) => response,
                Err(e) if e.is_retryable() => {
                    if budget > 0 {
                        warn!(attempt, remaining = budget, "Retry by the status code 500");
                        if let Some(delay) = delays.next() {
                            tokio::time::sleep(delay).await;
                        }
                    } else {
                        warn!(attempt, "Status code 500 with no retries left");
                    }
                    continue;
                }
                Err(e) => return Err(e),
            };

            let Some(candidate) = response.candidates.into_iter().next() else {
                debug!(attempt, "Response carried no candidates");
                break;
            };

            if !candidate.has_parts() {
                collected.push(Collected {
                    text: None,
                    finish_reason: candidate.finish_reason,
                });
                break;
            }

            let mut parts = candidate.into_parts();
            let Some(call) = parts.iter().find_map(|p| p.function_call.clone()) else {
                collected.extend(parts.into_iter().map(Collected::from));
                break;
            };

            request.contents.push(Content::model(parts.clone()));

            match directive::resolve(&call.name, self.client.extensions())? {
                Dispatch::Directive(d) => {
                    info!(directive = d.name(), attempt, "Model selected output type");
                    return Ok(d.extract(call.args));
                }
                Dispatch::Extension(ext) => {
                    debug!(function = ext.name(), attempt, "Calling extension function");
                    let content = ext.call(call.args.as_ref());
                    let response = FunctionResponse::new(call.name, content);
                    request
                        .contents
                        .push(Content::function_response(response.clone()));
                    parts.push(Part::function_response(response));
                    collected.extend(parts.into_iter().map(Collected::from));
                }
            }
        }

        Ok(final_value(collected.pop()))
    }
}

fn final_value(last: Option<Collected>) -> TypedValue {
    let Some(last) = last else {
        return TypedValue::NoValues;
    };
    if last.finish_reason.is_some_and(FinishReason::is_non_answer) {
        return TypedValue::NoValues;
    }
    match last.text {
        Some(text) => TypedValue::from_text(&text),
        None => {
            debug!(finish_reason = ?last.finish_reason, "Final entry carried no text");
            TypedValue::NoValues
        }
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the `TypedQuery` API resource
    #[must_use]
    pub const fn typed(&self) -> TypedQuery<'_, C> {
        TypedQuery::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(t: &str) -> Option<Collected> {
        Some(Collected {
            text: Some(t.into()),
            finish_reason: None,
        })
    }

    #[test]
    fn final_value_splits_last_text() {
        let v = final_value(text("a\n b \nc"));
        assert_eq!(v.as_lines().unwrap(), ["a", "b", "c"]);
    }

    #[test]
    fn final_value_sentinel_cases() {
        assert!(final_value(None).is_no_values());
        for reason in [FinishReason::Recitation, FinishReason::Other, FinishReason::Safety] {
            let v = final_value(Some(Collected {
                text: None,
                finish_reason: Some(reason),
            }));
            assert!(v.is_no_values(), "{reason:?}");
        }
    }
}
