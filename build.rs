fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/");

    // 使用 vendored protoc，构建机器无需预装
    let protoc = protoc_bin_vendored::protoc_bin_path().map_err(|e| e.to_string())?;
    // SAFETY: build 脚本是单线程进程，此时没有其他线程读取环境变量
    unsafe {
        std::env::set_var("PROTOC", protoc);
    }

    tonic_build::configure()
        .build_server(true)
        // 客户端代码供集成测试和调试工具使用
        .build_client(true)
        .compile_protos(&["proto/grades.proto"], &["proto"])?;

    Ok(())
}
