pub type AnimExprResult<T> = Result<T, AnimExprError>;

#[derive(thiserror::Error, Debug)]
pub enum AnimExprError {
    #[error("lex error on line {line} at byte {offset}: {message}")]
    Lex {
        line: usize,
        offset: usize,
        message: String,
    },

    #[error("syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("arity error: {call} expects {expected} arguments, got {got}")]
    Arity {
        call: String,
        expected: &'static str,
        got: usize,
    },

    #[error("argument error: {0}")]
    Argument(String),

    #[error("resolution error: {0}")]
    Resolve(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AnimExprError {
    pub fn lex(line: usize, offset: usize, msg: impl Into<String>) -> Self {
        Self::Lex {
            line,
            offset,
            message: msg.into(),
        }
    }

    pub fn syntax(line: usize, msg: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: msg.into(),
        }
    }

    pub fn arity(call: impl Into<String>, expected: &'static str, got: usize) -> Self {
        Self::Arity {
            call: call.into(),
            expected,
            got,
        }
    }

    pub fn argument(msg: impl Into<String>) -> Self {
        Self::Argument(msg.into())
    }

    pub fn resolve(msg: impl Into<String>) -> Self {
        Self::Resolve(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            AnimExprError::lex(1, 0, "x")
                .to_string()
                .starts_with("lex error on line 1 at byte 0:")
        );
        assert!(
            AnimExprError::syntax(3, "x")
                .to_string()
                .starts_with("syntax error on line 3:")
        );
        assert!(
            AnimExprError::arity("Delay", "1", 2)
                .to_string()
                .contains("Delay expects 1 arguments, got 2")
        );
        assert!(
            AnimExprError::argument("x")
                .to_string()
                .contains("argument error:")
        );
        assert!(
            AnimExprError::resolve("x")
                .to_string()
                .contains("resolution error:")
        );
        assert!(AnimExprError::config("x").to_string().contains("config error:"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = AnimExprError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
