/// # Summary
/// 为进程安装 rustls 默认加密后端 (ring)。
///
/// # Logic
/// HTTP 客户端以 `rustls-no-provider` 方式编译，构建客户端前必须先安装后端。
/// 重复调用是安全的，已安装时直接返回。
///
/// # Returns
/// 本次调用是否完成了安装。
pub fn install_crypto_provider() -> bool {
    rustls::crypto::ring::default_provider()
        .install_default()
        .is_ok()
}
