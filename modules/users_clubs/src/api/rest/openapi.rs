use utoipa::OpenApi;

use crate::api::problem::Problem;
use crate::api::rest::dto::{
    AvatarDto, ClubDto, CreateUserReq, MessageDto, UpdateImgReq, UpdateUserReq, UserDto,
    UserListDto,
};
use crate::api::rest::handlers;

#[derive(OpenApi)]
#[openapi(
    info(title = "Users API", description = "Users and their club memberships"),
    paths(
        handlers::add_user,
        handlers::update_user,
        handlers::update_user_img,
        handlers::delete_user,
        handlers::get_user,
        handlers::get_avatar,
        handlers::find_users,
        handlers::list_users,
    ),
    components(schemas(
        UserDto,
        ClubDto,
        CreateUserReq,
        UpdateUserReq,
        UpdateImgReq,
        UserListDto,
        AvatarDto,
        MessageDto,
        Problem,
    )),
    tags((name = "users", description = "User profiles and club memberships"))
)]
pub struct ApiDoc;
