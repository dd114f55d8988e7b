use campus_frontend::App;
use leptos::prelude::*;

#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();
    campus::log_info!("campus admin client starting");
    mount_to_body(App);
}
