//! Lexical and syntactic analysis of expressions, and their
//! conversion to postfix order.

pub mod error;
pub mod expr_tokenizer;
pub mod operator;
pub mod shunting_yard;
pub mod source;
pub mod token;
pub mod tokenizer;
