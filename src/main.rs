fn main() -> anyhow::Result<()> {
    deskwm_lib::run()
}
