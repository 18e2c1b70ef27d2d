pub use peroxide::prelude::linspace;
