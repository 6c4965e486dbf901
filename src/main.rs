fn main() -> Result<(), Box<dyn std::error::Error>> {
    gravicosmo::ui::run()
}
