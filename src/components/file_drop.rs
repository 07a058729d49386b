use web_sys::{DataTransfer, DragEvent, FileList, HtmlInputElement};
use yew::prelude::*;

use crate::config;
use crate::estimate::input_format::format_file_size;

#[derive(Clone, Debug, PartialEq)]
struct Picked {
    name: String,
    size: f64,
}

fn list_files(files: Option<FileList>) -> Vec<Picked> {
    let Some(files) = files else {
        return Vec::new();
    };
    (0..files.length())
        .filter_map(|i| files.get(i))
        .map(|f| Picked { name: f.name(), size: f.size() })
        .collect()
}

fn without(files: &FileList, skip: u32) -> Option<FileList> {
    let transfer = DataTransfer::new().ok()?;
    for i in (0..files.length()).filter(|i| *i != skip) {
        if let Some(file) = files.get(i) {
            let _ = transfer.items().add_with_file(&file);
        }
    }
    transfer.files()
}

#[derive(Properties, PartialEq)]
pub struct FileDropProps {
    pub name: AttrValue,
    /// Bumped by the parent after the form is reset so the list empties.
    #[prop_or_default]
    pub reset_token: u32,
}

#[function_component(FileDrop)]
pub fn file_drop(props: &FileDropProps) -> Html {
    let input_ref = use_node_ref();
    let files = use_state(Vec::<Picked>::new);
    let highlight = use_state(|| false);

    {
        let files = files.clone();
        use_effect_with_deps(
            move |_| {
                files.set(Vec::new());
                || ()
            },
            props.reset_token,
        );
    }

    let refresh = {
        let input_ref = input_ref.clone();
        let files = files.clone();
        Callback::from(move |_: ()| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                files.set(list_files(input.files()));
            }
        })
    };

    let on_drag_over = {
        let highlight = highlight.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            e.stop_propagation();
            highlight.set(true);
        })
    };

    let on_drag_leave = {
        let highlight = highlight.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            e.stop_propagation();
            highlight.set(false);
        })
    };

    let on_drop = {
        let highlight = highlight.clone();
        let input_ref = input_ref.clone();
        let refresh = refresh.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            e.stop_propagation();
            highlight.set(false);
            let dropped = e.data_transfer().and_then(|dt| dt.files());
            if let (Some(input), Some(dropped)) = (input_ref.cast::<HtmlInputElement>(), dropped) {
                input.set_files(Some(&dropped));
                refresh.emit(());
            }
        })
    };

    let on_change = {
        let refresh = refresh.clone();
        Callback::from(move |_: Event| refresh.emit(()))
    };

    let remove = |index: u32| {
        let input_ref = input_ref.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                if let Some(current) = input.files() {
                    input.set_files(without(&current, index).as_ref());
                }
                refresh.emit(());
            }
        })
    };

    html! {
        <div
            id={config::DROP_AREA_ID}
            class={classes!("drop-area", (*highlight).then(|| "highlight"))}
            ondragenter={on_drag_over.clone()}
            ondragover={on_drag_over}
            ondragleave={on_drag_leave}
            ondrop={on_drop}
        >
            <p>{"Drag reference files here, or "}
                <label class="file-pick">
                    {"browse"}
                    <input
                        ref={input_ref.clone()}
                        type="file"
                        name={props.name.clone()}
                        multiple={true}
                        onchange={on_change}
                    />
                </label>
            </p>
            if !files.is_empty() {
                <ul class="file-list">
                    { for files.iter().enumerate().map(|(i, f)| html! {
                        <li>
                            <span>{ &f.name }</span>
                            <span class="file-size">{ format!("({})", format_file_size(f.size)) }</span>
                            <button type="button" class="remove-file" aria-label="Remove file" onclick={remove(i as u32)}>
                                {"✕"}
                            </button>
                        </li>
                    }) }
                </ul>
            }
        </div>
    }
}
