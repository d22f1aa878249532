fn main() {
    // ESP-IDF link arguments only apply to the firmware target; host builds
    // (library tests, trace replay) need nothing from here.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}
