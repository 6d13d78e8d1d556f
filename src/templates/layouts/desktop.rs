use maud::{html, Markup, PreEscaped, DOCTYPE};

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(STYLE)) }
                script src="https://unpkg.com/htmx.org@1.9.12" defer {};
            }
            body {
              header class="site-header" {
                  svg
                      xmlns="http://www.w3.org/2000/svg"
                      width="24"
                      height="24"
                      viewBox="0 0 24 24"
                      fill="none"
                      stroke="#524ed2"
                      stroke-width="2"
                      stroke-linecap="round"
                      stroke-linejoin="round"
                      class="icon icon-tabler icon-tabler-home"
                  {
                      path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                      path d="M5 12l-2 0l9 -9l9 9l-2 0" {}
                      path d="M5 12v7a2 2 0 0 0 2 2h10a2 2 0 0 0 2 -2v-7" {}
                      path d="M9 21v-6a2 2 0 0 1 2 -2h2a2 2 0 0 1 2 2v6" {}
                  }
                  h3 { "House Price Prediction" }
              }
                (content)
            }
        }
    }
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 760px; margin: 0 auto; padding: 1rem; color: #222; }
.site-header { display: flex; align-items: center; gap: .5rem; border-bottom: 1px solid #eee; margin-bottom: 1rem; }
.card { border: 1px solid #e5e7eb; border-radius: 8px; padding: 1rem; margin-bottom: 1rem; }
.field { display: flex; flex-direction: column; margin-bottom: .75rem; }
.field label { font-weight: 600; margin-bottom: .25rem; }
.pills { display: flex; gap: .5rem; }
.grid { display: grid; grid-template-columns: 1fr 1fr; gap: 0 1rem; }
.hint { color: #6b7280; font-size: .85rem; }
.alert { padding: .75rem 1rem; border-radius: 6px; }
.alert-success { background: #ecfdf5; color: #065f46; }
.alert-error { background: #fef2f2; color: #991b1b; }
.btn { padding: 8px 16px; font-size: 16px; cursor: pointer; }
"#;
