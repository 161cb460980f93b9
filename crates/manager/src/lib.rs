//! # `kagami-manager` - 应用服务层
//!
//! 组合代码解析器、行情提供者与投影引擎，承担调用层职责：
//! 周期到抓取窗口的换算、回测模式下的抓取区间扩展、替换提示与错误归类。

pub mod mirror;
