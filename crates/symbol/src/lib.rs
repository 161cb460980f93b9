//! # `kagami-symbol` - 代码解析器
//!
//! 纯字符串逻辑：别名表查找 + 按首字符分类规整。不做任何网络或文件 I/O。

pub mod alias;
pub mod resolver;

pub use alias::AliasTable;
pub use resolver::{resolve, SymbolResolver};
