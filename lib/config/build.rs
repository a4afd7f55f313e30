use std::{collections::BTreeMap, env, fs, path::PathBuf};

fn parse_hex(hex_str: &str) -> Result<u64, std::num::ParseIntError> {
    let clean_hex = hex_str.trim().trim_start_matches("0x").replace("_", "");
    u64::from_str_radix(clean_hex.as_str(), 16)
}

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let flags_path = PathBuf::from(manifest_dir).join("../../bus.json");
    let flags_str = fs::read_to_string(&flags_path).unwrap();
    let sections: BTreeMap<String, BTreeMap<String, String>> =
        serde_json::from_str(&flags_str).unwrap();
    make_flags(&sections);
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../../bus.json");
}

fn make_flags(sections: &BTreeMap<String, BTreeMap<String, String>>) {
    let mut s = String::new();
    for (section, flags) in sections {
        s += format!("/// Constants from section `{}` of bus.json\npub mod {} {{\n", section, section).as_str();
        for (key, value) in flags {
            let value = parse_hex(value)
                .unwrap_or_else(|err| panic!("Invalid value for '{}.{}': {:?}", section, key, err));
            s += format!("    #[allow(missing_docs)]\n    pub const {}: usize = {:#x};\n", key, value).as_str();
        }
        s += "}\n";
    }
    let out_dir = env::var("OUT_DIR").unwrap();
    let path = PathBuf::from(out_dir).join("build_flags.rs");
    fs::write(path, s).unwrap();
}
