use kagami_core::symbol::entity::{CanonicalSymbol, LISTED_SUFFIX, OTC_SUFFIX, Resolution};
use kagami_core::symbol::error::ResolutionError;

use crate::alias::AliasTable;

/// # Summary
/// 代码解析器：把用户输入映射为行情提供者的规范代码。
///
/// # Invariants
/// - 无内部可变状态，`&self` 即可并发调用。
/// - 不做任何 I/O。
#[derive(Debug, Clone)]
pub struct SymbolResolver {
    aliases: AliasTable,
}

impl SymbolResolver {
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// # Summary
    /// 解析用户输入，仅返回规范代码。
    ///
    /// # Arguments
    /// * `raw`: 用户输入的原始字符串。
    ///
    /// # Returns
    /// 成功返回 `CanonicalSymbol`，否则返回 `ResolutionError`。
    pub fn resolve(&self, raw: &str) -> Result<CanonicalSymbol, ResolutionError> {
        self.resolve_detailed(raw).map(|r| r.symbol)
    }

    /// # Summary
    /// 解析用户输入并保留输入与命中的别名，供调用方提示替换。
    ///
    /// # Logic
    /// 1. 去除首尾空白，为空则返回 `EmptyInput`。
    /// 2. 精确匹配别名表，命中则以表中代码替换输入。
    /// 3. 按代码首字符分类规整，见 [`normalize`]。
    pub fn resolve_detailed(&self, raw: &str) -> Result<Resolution, ResolutionError> {
        resolve_with(&self.aliases, raw)
    }
}

impl Default for SymbolResolver {
    fn default() -> Self {
        Self::new(AliasTable::builtin())
    }
}

/// 使用内置别名表解析输入
pub fn resolve(raw: &str) -> Result<CanonicalSymbol, ResolutionError> {
    resolve_with(AliasTable::shared_builtin(), raw).map(|r| r.symbol)
}

fn resolve_with(aliases: &AliasTable, raw: &str) -> Result<Resolution, ResolutionError> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(ResolutionError::EmptyInput);
    }

    let (code, alias) = match aliases.get(input) {
        Some(code) => (code, Some(input.to_string())),
        None => (input, None),
    };

    Ok(Resolution {
        input: input.to_string(),
        symbol: normalize(code)?,
        alias,
    })
}

/// # Summary
/// 按首字符对代码分类并规整为规范形态。
///
/// # Logic
/// 1. 数字开头：交易所代码。已带 `.TW` / `.TWO` (不分大小写) 则保留并转大写，否则补 `.TW`。
/// 2. 字母开头：外国代码。转大写，`.` 与 `/` 替换为 `-` (如 `BRK.B` -> `BRK-B`)。
/// 3. 其他首字符：`UnrecognizedFormat`。
/// 4. 规整结果必须满足 `CanonicalSymbol` 的形态约束，否则同样视为无法识别。
pub fn normalize(code: &str) -> Result<CanonicalSymbol, ResolutionError> {
    let first = code.chars().next().ok_or(ResolutionError::EmptyInput)?;

    let normalized = if first.is_ascii_digit() {
        let upper = code.to_ascii_uppercase();
        if upper.ends_with(OTC_SUFFIX) || upper.ends_with(LISTED_SUFFIX) {
            upper
        } else {
            format!("{upper}{LISTED_SUFFIX}")
        }
    } else if first.is_ascii_alphabetic() {
        code.to_ascii_uppercase().replace(['.', '/'], "-")
    } else {
        return Err(ResolutionError::UnrecognizedFormat(code.to_string()));
    };

    CanonicalSymbol::from_normalized(normalized)
        .map_err(|_| ResolutionError::UnrecognizedFormat(code.to_string()))
}
