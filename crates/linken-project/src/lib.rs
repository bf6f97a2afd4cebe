pub mod package_json;

pub use package_json::{
    DependencyType, PackageJson, has_package_json, package_json_path, read_package_json,
};
