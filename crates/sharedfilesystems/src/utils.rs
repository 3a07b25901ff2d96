use std::fmt;
use tracing::{field, Span};

/// Records a value on the current span, then passes it through. The field
/// must have been declared on the span (`fields(request, response)`).
pub(crate) trait Record: Sized {
  fn record_field(self, field: &'static str) -> Self;

  #[inline]
  fn record_request(self) -> Self {
    self.record_field("request")
  }

  #[inline]
  fn record_response(self) -> Self {
    self.record_field("response")
  }
}

impl<T: fmt::Debug> Record for T {
  #[inline]
  fn record_field(self, field: &'static str) -> Self {
    Span::current().record(field, &field::debug(&self));
    self
  }
}

/// Records `response` on success and `error` on failure.
pub(crate) trait RecordOutcome: Sized {
  fn record_outcome(self) -> Self;
}

impl<T: fmt::Debug, E: fmt::Display> RecordOutcome for Result<T, E> {
  fn record_outcome(self) -> Self {
    let span = Span::current();
    match &self {
      Ok(v) => span.record("response", &field::debug(v)),
      Err(e) => span.record("error", &field::display(e)),
    };

    self
  }
}
