fn main() {
    // ESP-IDF link arguments are only needed when building for the chip.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
