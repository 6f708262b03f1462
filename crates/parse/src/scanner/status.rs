/// Outcome of a successful [`ParseContext::parse_request_line`](super::ParseContext::parse_request_line) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestLineStatus {
    /// Method, URI, query string and protocol are finalized
    Complete,
    /// The buffer ended mid line, call again with more bytes
    Incomplete,
}

/// Outcome of a successful [`ParseContext::parse_header_line`](super::ParseContext::parse_header_line) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLineStatus {
    /// One header was appended, call again for the next one
    Header,
    /// The blank line ending the header block was consumed
    End,
    /// The buffer ended mid line, call again with more bytes
    Incomplete,
}

impl RequestLineStatus {
    #[inline]
    pub fn is_complete(&self) -> bool {
        matches!(self, RequestLineStatus::Complete)
    }
}

impl HeaderLineStatus {
    #[inline]
    pub fn is_end(&self) -> bool {
        matches!(self, HeaderLineStatus::End)
    }

    #[inline]
    pub fn is_incomplete(&self) -> bool {
        matches!(self, HeaderLineStatus::Incomplete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpers() {
        assert!(RequestLineStatus::Complete.is_complete());
        assert!(!RequestLineStatus::Incomplete.is_complete());

        assert!(HeaderLineStatus::End.is_end());
        assert!(!HeaderLineStatus::Header.is_end());
        assert!(HeaderLineStatus::Incomplete.is_incomplete());
        assert!(!HeaderLineStatus::Header.is_incomplete());
    }
}
