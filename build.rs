fn main() {
    if std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() == "windows" {
        let mut res = winres::WindowsResource::new();
        res.set("ProductName", "Prompt Sync");
        res.set("FileDescription", "Prompt Sync");
        res.compile().expect("Failed to compile Windows resources");
    }
}
