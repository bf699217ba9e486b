fn main() {
    // ESP-IDF environment only matters for the on-target binary; host
    // builds (unit + integration tests) skip it entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
