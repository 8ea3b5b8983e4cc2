//! Shared class names and the stylesheet they refer to.

pub const STYLES: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: #f5f7fb; color: #0f172a; }
.page { max-width: 72rem; margin: 0 auto; padding: 3rem 1rem; }
.title { font-size: 2.5rem; font-weight: 700; text-align: center; margin: 0 0 .5rem; }
.subtitle { text-align: center; color: #64748b; margin: 0 0 2.5rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(22rem, 1fr)); gap: 2rem; }
.card { background: #fff; border: 2px solid #e2e8f0; border-radius: .75rem; padding: 1.5rem; }
.card h2 { margin: 0 0 .25rem; font-size: 1.5rem; }
.muted { color: #64748b; font-size: .875rem; }
.input { width: 100%; box-sizing: border-box; font-size: 1.125rem; padding: .75rem; border: 2px solid #cbd5e1; border-radius: .5rem; }
.btn { width: 100%; margin-top: 1rem; padding: .75rem; font-size: 1.125rem; font-weight: 600; color: #fff; background: #4f46e5; border: 0; border-radius: .5rem; cursor: pointer; }
.btn:disabled { opacity: .5; cursor: not-allowed; }
.error { margin-top: 1rem; padding: 1rem; border-radius: .5rem; background: #fef2f2; color: #b91c1c; font-weight: 500; }
.row { display: flex; justify-content: space-between; margin-bottom: .5rem; }
.total { margin: 1.5rem 0; padding: 2rem; border-radius: .75rem; text-align: center; color: #fff; background: linear-gradient(90deg, #0ea5e9, #6366f1); }
.total .amount { font-size: 3rem; font-weight: 700; margin: .25rem 0; }
.badges { display: grid; grid-template-columns: repeat(3, 1fr); gap: .75rem; }
.badge { padding: .75rem; text-align: center; font-family: monospace; font-weight: 600; border: 2px solid #c7d2fe; border-radius: .5rem; background: #eef2ff; }
.badge.overflow { color: #64748b; background: #f1f5f9; border-color: #e2e8f0; }
.placeholder { padding: 3rem 0; text-align: center; color: #64748b; font-size: 1.125rem; }
"#;

pub fn submit_button_label(loading: bool) -> &'static str {
    if loading {
        "Получение данных..."
    } else {
        "Рассчитать стоимость"
    }
}
