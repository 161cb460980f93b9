use serde::{Deserialize, Serialize};
use std::fmt;

use crate::symbol::error::ResolutionError;

/// 交易所代码 (台股上市) 后缀
pub const LISTED_SUFFIX: &str = ".TW";
/// 交易所代码 (台股上柜) 后缀
pub const OTC_SUFFIX: &str = ".TWO";

/// # Summary
/// 规范化证券代码，即行情提供者要求的精确标识。
///
/// # Invariants
/// - 非空。
/// - 两种形态之一：
///   - 交易所代码：数字开头的字母数字主体 + `.TW` / `.TWO`，全部大写。
///   - 外国代码：字母开头，仅包含大写字母、数字与 `-`。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalSymbol(String);

impl CanonicalSymbol {
    /// # Summary
    /// 以已规整的字符串构造规范代码。
    ///
    /// # Logic
    /// 只校验形态，不做任何改写；改写属于解析器的职责。
    ///
    /// # Returns
    /// 形态合法时返回实例，否则返回 `ResolutionError::UnrecognizedFormat`。
    pub fn from_normalized(code: impl Into<String>) -> Result<Self, ResolutionError> {
        let code = code.into();
        if is_exchange_coded(&code) || is_foreign_ticker(&code) {
            Ok(Self(code))
        } else if code.is_empty() {
            Err(ResolutionError::EmptyInput)
        } else {
            Err(ResolutionError::UnrecognizedFormat(code))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 是否为带 `.TW` / `.TWO` 后缀的交易所代码
    pub fn is_exchange_coded(&self) -> bool {
        is_exchange_coded(&self.0)
    }
}

fn is_exchange_coded(code: &str) -> bool {
    let body = code
        .strip_suffix(OTC_SUFFIX)
        .or_else(|| code.strip_suffix(LISTED_SUFFIX));
    match body {
        Some(body) => {
            body.starts_with(|c: char| c.is_ascii_digit())
                && body
                    .chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        }
        None => false,
    }
}

fn is_foreign_ticker(code: &str) -> bool {
    code.starts_with(|c: char| c.is_ascii_uppercase())
        && code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
}

impl fmt::Display for CanonicalSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalSymbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CanonicalSymbol {
    type Error = ResolutionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_normalized(value)
    }
}

impl From<CanonicalSymbol> for String {
    fn from(value: CanonicalSymbol) -> Self {
        value.0
    }
}

/// # Summary
/// 一次解析的完整记录，供调用方提示“已自动转换”。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    // 去除空白后的原始输入
    pub input: String,
    // 解析结果
    pub symbol: CanonicalSymbol,
    // 命中的别名表键 (若有)
    pub alias: Option<String>,
}

impl Resolution {
    /// 结果与输入不同，调用方应向用户提示替换
    pub fn is_substituted(&self) -> bool {
        self.symbol.as_str() != self.input
    }
}
