//! Robot files used across the integration tests.

pub const SUITE: &str = "\
*** Settings ***
Documentation    Checks the login flow
...              against the staging server.
Library          Collections
Library          Remote    http://localhost:8270    WITH NAME    Staging
Resource         ${RESOURCES}/common.resource    # shared keywords
Variables        vars.py    staging
Suite Setup      Open Connection    ${HOST}

*** Variables ***
${HOST}          localhost
@{USERS}         alice    bob
...              carol
&{LIMITS}        max=10    min=1

*** Test Cases ***
Valid Login
    [Documentation]    Logs in with every user
    [Tags]    smoke    login
    FOR    ${user}    IN    @{USERS}
        Login As    ${user}
        Should Be Equal    ${LIMITS}[max]    10
    END
    ${status}=    Run Keyword And Return Status    Logout

Legacy Loop
    :FOR    ${index}    IN RANGE    10
    \\    Log    ${index}
    \\    Log    ${USERS}[${index}]

*** Keywords ***
Login As
    [Arguments]    ${name}    ${password}=secret
    Log    Logging in ${name}    # no secrets
    [Return]    ${name}
";

pub const PIPES: &str = "\
| *** Test Cases *** |
| Pipe Case | Log | one |
| | Log | two |
";

pub const TSV: &str = "*** Test Cases ***\nTab Case\n\tLog\tone\n\tLog\ttwo\n";
