//! Operator token types carried by expression nodes.
//!
//! Binary, unary and assignment expressions store the punctuator the parser
//! saw. Both dumpers render it back through [`TokenType::as_str`].

/// Operator punctuators and keyword operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenType {
    // Arithmetic
    Plus,
    Minus,
    Multiply,
    Divide,
    Mod,
    Exponentiation,

    // Comparison
    Equal,
    NotEqual,
    StrictEqual,
    NotStrictEqual,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    InstanceOf,

    // Logical
    LogicalAnd,
    LogicalOr,
    NullishCoalescing,

    // Bitwise
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LeftShift,
    RightShift,
    UnsignedRightShift,

    // Unary only
    ExclamationMark,
    Tilde,
    Typeof,

    // Assignment
    Substitution,
    PlusEqual,
    MinusEqual,
    MultiplyEqual,
    DivideEqual,
    ModEqual,
    BitwiseAndEqual,
    BitwiseOrEqual,
    BitwiseXorEqual,
    LeftShiftEqual,
    RightShiftEqual,
}

impl TokenType {
    /// Source text of the token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Mod => "%",
            Self::Exponentiation => "**",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::StrictEqual => "===",
            Self::NotStrictEqual => "!==",
            Self::LessThan => "<",
            Self::LessThanEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanEqual => ">=",
            Self::InstanceOf => "instanceof",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::NullishCoalescing => "??",
            Self::BitwiseAnd => "&",
            Self::BitwiseOr => "|",
            Self::BitwiseXor => "^",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::UnsignedRightShift => ">>>",
            Self::ExclamationMark => "!",
            Self::Tilde => "~",
            Self::Typeof => "typeof",
            Self::Substitution => "=",
            Self::PlusEqual => "+=",
            Self::MinusEqual => "-=",
            Self::MultiplyEqual => "*=",
            Self::DivideEqual => "/=",
            Self::ModEqual => "%=",
            Self::BitwiseAndEqual => "&=",
            Self::BitwiseOrEqual => "|=",
            Self::BitwiseXorEqual => "^=",
            Self::LeftShiftEqual => "<<=",
            Self::RightShiftEqual => ">>=",
        }
    }

    /// `=` or a compound assignment.
    pub const fn is_assignment(self) -> bool {
        matches!(
            self,
            Self::Substitution
                | Self::PlusEqual
                | Self::MinusEqual
                | Self::MultiplyEqual
                | Self::DivideEqual
                | Self::ModEqual
                | Self::BitwiseAndEqual
                | Self::BitwiseOrEqual
                | Self::BitwiseXorEqual
                | Self::LeftShiftEqual
                | Self::RightShiftEqual
        )
    }

    /// Binary operator a compound assignment applies (`+=` -> `+`).
    pub const fn compound_operator(self) -> Option<TokenType> {
        match self {
            Self::PlusEqual => Some(Self::Plus),
            Self::MinusEqual => Some(Self::Minus),
            Self::MultiplyEqual => Some(Self::Multiply),
            Self::DivideEqual => Some(Self::Divide),
            Self::ModEqual => Some(Self::Mod),
            Self::BitwiseAndEqual => Some(Self::BitwiseAnd),
            Self::BitwiseOrEqual => Some(Self::BitwiseOr),
            Self::BitwiseXorEqual => Some(Self::BitwiseXor),
            Self::LeftShiftEqual => Some(Self::LeftShift),
            Self::RightShiftEqual => Some(Self::RightShift),
            _ => None,
        }
    }

    /// Binding power of a binary operator. Higher binds tighter.
    ///
    /// Used by the source dumper to decide where parentheses are needed.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Exponentiation => 14,
            Self::Multiply | Self::Divide | Self::Mod => 13,
            Self::Plus | Self::Minus => 12,
            Self::LeftShift | Self::RightShift | Self::UnsignedRightShift => 11,
            Self::LessThan
            | Self::LessThanEqual
            | Self::GreaterThan
            | Self::GreaterThanEqual
            | Self::InstanceOf => 10,
            Self::Equal | Self::NotEqual | Self::StrictEqual | Self::NotStrictEqual => 9,
            Self::BitwiseAnd => 8,
            Self::BitwiseXor => 7,
            Self::BitwiseOr => 6,
            Self::LogicalAnd => 5,
            Self::LogicalOr => 4,
            Self::NullishCoalescing => 3,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_operators() {
        assert_eq!(TokenType::PlusEqual.compound_operator(), Some(TokenType::Plus));
        assert_eq!(TokenType::Substitution.compound_operator(), None);
        assert!(TokenType::ModEqual.is_assignment());
        assert!(!TokenType::Plus.is_assignment());
    }

    #[test]
    fn precedence_orders_multiplicative_above_additive() {
        assert!(TokenType::Multiply.precedence() > TokenType::Plus.precedence());
        assert!(TokenType::LogicalAnd.precedence() > TokenType::LogicalOr.precedence());
        assert_eq!(TokenType::UnsignedRightShift.as_str(), ">>>");
    }
}
