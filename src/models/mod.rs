pub mod filter;
pub mod movie;
pub mod page;
pub mod person;
pub mod review;

pub use filter::{genre_from_location, FilterCriteria, FilterField, FilterPatch, ListQuery, NameSearch};
pub use movie::{FavoriteMovie, Genre, Movie, MovieDetail};
pub use page::{page_count, PageResult, Paginated};
pub use person::{Actor, Director, Person, PersonDetail};
pub use review::Review;
