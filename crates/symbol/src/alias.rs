use std::collections::HashMap;
use std::sync::OnceLock;

/// 内置别名：常用中文名称 / 俗称 -> 原始代码。
/// 代码可带 `.TW` / `.TWO` 后缀 (上柜标的必须带 `.TWO`)，其余由解析器补全。
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    // 上市个股
    ("台積電", "2330"),
    ("鴻海", "2317"),
    ("聯發科", "2454"),
    ("台達電", "2308"),
    ("廣達", "2382"),
    ("聯電", "2303"),
    ("日月光投控", "3711"),
    ("大立光", "3008"),
    ("華碩", "2357"),
    ("緯創", "3231"),
    ("緯穎", "6669"),
    ("英業達", "2356"),
    ("技嘉", "2376"),
    ("仁寶", "2324"),
    ("和碩", "4938"),
    ("瑞昱", "2379"),
    ("聯詠", "3034"),
    ("奇鋐", "3017"),
    ("台光電", "2383"),
    ("世芯-KY", "3661"),
    ("中華電", "2412"),
    ("台灣大", "3045"),
    ("遠傳", "4904"),
    ("中鋼", "2002"),
    ("台塑", "1301"),
    ("南亞", "1303"),
    ("台化", "1326"),
    ("台塑化", "6505"),
    ("統一", "1216"),
    ("統一超", "2912"),
    ("長榮", "2603"),
    ("陽明", "2609"),
    ("萬海", "2615"),
    ("長榮航", "2618"),
    ("華航", "2610"),
    // 金融
    ("華南金", "2880"),
    ("富邦金", "2881"),
    ("國泰金", "2882"),
    ("開發金", "2883"),
    ("玉山金", "2884"),
    ("元大金", "2885"),
    ("兆豐金", "2886"),
    ("台新金", "2887"),
    ("中信金", "2891"),
    ("第一金", "2892"),
    ("合庫金", "5880"),
    // 上柜
    ("元太", "8069.TWO"),
    ("環球晶", "6488.TWO"),
    ("中美晶", "5483.TWO"),
    ("信驊", "5274.TWO"),
    ("世界", "5347.TWO"),
    // ETF
    ("元大台灣50", "0050"),
    ("台灣50", "0050"),
    ("元大高股息", "0056"),
    ("富邦台50", "006208"),
    ("元大台灣50正2", "00631L"),
    ("元大台灣高息低波", "00713"),
    ("國泰永續高股息", "00878"),
    ("群益台灣精選高息", "00919"),
    ("復華台灣科技優息", "00929"),
    ("元大台灣價值高息", "00940"),
    ("元大美債20年", "00679B.TWO"),
    // 海外
    ("蘋果", "AAPL"),
    ("輝達", "NVDA"),
    ("微軟", "MSFT"),
    ("特斯拉", "TSLA"),
    ("谷歌", "GOOGL"),
    ("亞馬遜", "AMZN"),
    ("臉書", "META"),
    ("超微", "AMD"),
    ("英特爾", "INTC"),
    ("博通", "AVGO"),
    ("波克夏", "BRK.B"),
    ("台積電ADR", "TSM"),
    ("標普500", "SPY"),
    ("那斯達克100", "QQQ"),
    ("比特幣", "BTC-USD"),
];

/// # Summary
/// 显示名称到原始代码的静态映射。
///
/// # Invariants
/// - 启动时构造一次，之后只读，可在并发查询间共享。
/// - 键按精确字符串匹配，不做大小写或空白折叠 (输入在查找前已 trim)。
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    /// 仅包含内置条目的别名表
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_ALIASES.iter().copied())
    }

    /// 进程级共享的内置别名表
    pub fn shared_builtin() -> &'static AliasTable {
        static BUILTIN: OnceLock<AliasTable> = OnceLock::new();
        BUILTIN.get_or_init(AliasTable::builtin)
    }

    /// # Summary
    /// 由任意 (名称, 代码) 对构造别名表。
    ///
    /// # Logic
    /// 名称与代码都会去除首尾空白；任一为空的条目被忽略。
    /// 重复名称以后出现者为准。
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut table = Self::default();
        table.extend(pairs);
        table
    }

    /// 追加条目 (例如来自配置文件的附加别名)，同名覆盖
    pub fn with_extra<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.extend(pairs);
        self
    }

    fn extend<K, V>(&mut self, pairs: impl IntoIterator<Item = (K, V)>)
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, code) in pairs {
            let (name, code) = (name.as_ref().trim(), code.as_ref().trim());
            if name.is_empty() || code.is_empty() {
                continue;
            }
            self.entries.insert(name.to_string(), code.to_string());
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
